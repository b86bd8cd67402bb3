//! Notes list view-model.
//!
//! # Responsibility
//! - Hold list-screen state: sort selectors, sort panel visibility and the
//!   undo slot for the last deleted note.
//! - Translate `NotesEvent`s into use-case calls.
//!
//! # Invariants
//! - `NotesUiState.notes` is always derived from the repository stream and
//!   never owned here.
//! - At most one deleted note is kept for undo; a new delete overwrites it.
//! - The undo slot only ever holds the stored record of a note that was
//!   actually removed.
//! - Re-selecting the current key/mode does not wake observers.

use crate::model::note::{Note, NoteOrder, SortKey, SortMode};
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceError};
use crate::service::sorted_notes::{NotesStreamClosed, SortedNotes};
use log::debug;
use tokio::sync::watch;

/// User intents emitted by the notes list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesEvent {
    SetSortKey(SortKey),
    SetSortMode(SortMode),
    ToggleSortPanel,
    SetSortPanelVisible(bool),
    DeleteNote(Note),
    UndoDelete,
}

/// Render-ready snapshot of the list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesUiState {
    pub notes: Vec<Note>,
    pub sort_key: SortKey,
    pub sort_mode: SortMode,
    pub sort_panel_visible: bool,
}

/// View-model backing the notes list screen.
pub struct NotesViewModel<R: NoteRepository> {
    service: NoteService<R>,
    sort_key: watch::Sender<SortKey>,
    sort_mode: watch::Sender<SortMode>,
    sort_panel_visible: watch::Sender<bool>,
    visibility: watch::Receiver<bool>,
    sorted: SortedNotes,
    recently_deleted: Option<Note>,
}

impl<R: NoteRepository> NotesViewModel<R> {
    /// Creates a view-model with the default ordering (title, ascending) and
    /// a hidden sort panel.
    pub fn new(service: NoteService<R>) -> Self {
        Self::with_order(service, NoteOrder::default())
    }

    /// Creates a view-model starting from the given ordering.
    pub fn with_order(service: NoteService<R>, order: NoteOrder) -> Self {
        let (sort_key, key_rx) = watch::channel(order.key);
        let (sort_mode, mode_rx) = watch::channel(order.mode);
        let (sort_panel_visible, visibility) = watch::channel(false);
        let sorted = service.sorted_notes(key_rx, mode_rx);
        Self {
            service,
            sort_key,
            sort_mode,
            sort_panel_visible,
            visibility,
            sorted,
            recently_deleted: None,
        }
    }

    /// Applies one screen event.
    pub fn on_event(&mut self, event: NotesEvent) -> Result<(), NoteServiceError> {
        match event {
            NotesEvent::SetSortKey(key) => {
                replace_if_changed(&self.sort_key, key);
            }
            NotesEvent::SetSortMode(mode) => {
                replace_if_changed(&self.sort_mode, mode);
            }
            NotesEvent::ToggleSortPanel => {
                self.sort_panel_visible.send_modify(|visible| *visible = !*visible);
            }
            NotesEvent::SetSortPanelVisible(visible) => {
                replace_if_changed(&self.sort_panel_visible, visible);
            }
            NotesEvent::DeleteNote(note) => {
                let stored = match self.service.get_note_by_id(note.id) {
                    Ok(stored) => stored,
                    Err(NoteServiceError::NoteNotFound(id)) => {
                        debug!("event=note_delete module=viewmodel status=skipped id={id}");
                        return Ok(());
                    }
                    Err(err) => return Err(err),
                };
                self.service.delete_note(&stored)?;
                self.recently_deleted = Some(stored);
            }
            NotesEvent::UndoDelete => {
                let Some(note) = self.recently_deleted.take() else {
                    debug!("event=note_undo module=viewmodel status=skipped reason=empty");
                    return Ok(());
                };
                if let Err(err) = self.service.insert_note(&note) {
                    self.recently_deleted = Some(note);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Returns the latest UI state and marks every input as seen.
    pub fn ui_state(&mut self) -> NotesUiState {
        let order = self.sorted.order();
        NotesUiState {
            notes: self.sorted.current(),
            sort_key: order.key,
            sort_mode: order.mode,
            sort_panel_visible: *self.visibility.borrow_and_update(),
        }
    }

    /// Waits until the list, a selector or the panel visibility changed.
    pub async fn changed(&mut self) -> Result<(), NotesStreamClosed> {
        tokio::select! {
            result = self.sorted.changed() => result,
            // The sender lives in `self`, so this never reports closure.
            _ = self.visibility.changed() => Ok(()),
        }
    }

    /// Waits for the next change and returns the fresh UI state.
    ///
    /// Returns `None` once the repository stream is gone.
    pub async fn next_ui_state(&mut self) -> Option<NotesUiState> {
        self.changed().await.ok()?;
        Some(self.ui_state())
    }

    /// Note kept for `UndoDelete`, if any.
    pub fn recently_deleted(&self) -> Option<&Note> {
        self.recently_deleted.as_ref()
    }

    /// Currently selected ordering.
    pub fn sort_order(&self) -> NoteOrder {
        NoteOrder::new(*self.sort_key.borrow(), *self.sort_mode.borrow())
    }

    /// Use-case service shared with other screens.
    pub fn service(&self) -> &NoteService<R> {
        &self.service
    }
}

fn replace_if_changed<T: PartialEq>(sender: &watch::Sender<T>, value: T) {
    sender.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::{NotesEvent, NotesViewModel};
    use crate::model::note::{Note, NoteColor, SortKey, SortMode};
    use crate::repo::memory_note_repo::InMemoryNoteRepository;
    use crate::service::note_service::NoteService;

    fn view_model() -> NotesViewModel<InMemoryNoteRepository> {
        let repo = InMemoryNoteRepository::with_notes(vec![
            Note::with_id(1, "note1", "note content1", 200, NoteColor::Color1),
            Note::with_id(2, "note2", "note content2", 100, NoteColor::Color3),
        ])
        .unwrap();
        NotesViewModel::new(NoteService::new(repo))
    }

    #[test]
    fn toggle_flips_panel_visibility() {
        let mut vm = view_model();
        assert!(!vm.ui_state().sort_panel_visible);
        vm.on_event(NotesEvent::ToggleSortPanel).unwrap();
        assert!(vm.ui_state().sort_panel_visible);
        vm.on_event(NotesEvent::ToggleSortPanel).unwrap();
        assert!(!vm.ui_state().sort_panel_visible);
    }

    #[test]
    fn undo_without_delete_is_noop() {
        let mut vm = view_model();
        vm.on_event(NotesEvent::UndoDelete).unwrap();
        assert_eq!(vm.ui_state().notes.len(), 2);
    }

    #[test]
    fn selectors_are_reflected_in_state() {
        let mut vm = view_model();
        vm.on_event(NotesEvent::SetSortKey(SortKey::Timestamp)).unwrap();
        vm.on_event(NotesEvent::SetSortMode(SortMode::Descending))
            .unwrap();

        let state = vm.ui_state();
        assert_eq!(state.sort_key, SortKey::Timestamp);
        assert_eq!(state.sort_mode, SortMode::Descending);
        let ids: Vec<_> = state.notes.iter().map(|note| note.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
