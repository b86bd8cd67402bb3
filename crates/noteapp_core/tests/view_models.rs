use noteapp_core::db::open_db_in_memory;
use noteapp_core::{
    AddEditNoteError, AddEditNoteEvent, AddEditNoteViewModel, InMemoryNoteRepository, Note,
    NoteColor, NoteOrder, NoteService, NoteServiceError, NotesEvent, NotesViewModel, SortKey,
    SortMode, SqliteNoteRepository,
};
use std::sync::Arc;
use std::time::Duration;

fn seeded_repo() -> Arc<InMemoryNoteRepository> {
    let repo = InMemoryNoteRepository::with_notes(vec![
        Note::with_id(1, "beta", "b", 20, NoteColor::Color2),
        Note::with_id(2, "alpha", "a", 30, NoteColor::Color1),
        Note::with_id(3, "gamma", "g", 10, NoteColor::Color4),
    ])
    .unwrap();
    Arc::new(repo)
}

fn titles(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|note| note.title.as_str()).collect()
}

#[test]
fn delete_then_undo_restores_same_note() {
    let mut vm = NotesViewModel::new(NoteService::new(seeded_repo()));
    let target = vm.ui_state().notes[0].clone();
    assert_eq!(target.title, "alpha");

    vm.on_event(NotesEvent::DeleteNote(target.clone())).unwrap();
    assert_eq!(titles(&vm.ui_state().notes), vec!["beta", "gamma"]);
    assert_eq!(vm.recently_deleted(), Some(&target));

    vm.on_event(NotesEvent::UndoDelete).unwrap();
    let state = vm.ui_state();
    assert_eq!(titles(&state.notes), vec!["alpha", "beta", "gamma"]);
    assert_eq!(state.notes[0], target);
    assert!(vm.recently_deleted().is_none());
}

#[test]
fn undo_after_deleting_absent_note_leaves_list_unchanged() {
    let mut vm = NotesViewModel::new(NoteService::new(seeded_repo()));
    let before = vm.ui_state().notes;

    let ghost = Note::with_id(42, "ghost", "never stored", 1, NoteColor::Color5);
    vm.on_event(NotesEvent::DeleteNote(ghost)).unwrap();
    assert!(vm.recently_deleted().is_none());

    vm.on_event(NotesEvent::UndoDelete).unwrap();
    assert_eq!(vm.ui_state().notes, before);
}

#[test]
fn delete_by_id_keeps_stored_record_for_undo() {
    let mut vm = NotesViewModel::new(NoteService::new(seeded_repo()));
    vm.ui_state();

    let by_id = Note {
        id: 3,
        ..Note::default()
    };
    vm.on_event(NotesEvent::DeleteNote(by_id)).unwrap();
    let kept = vm.recently_deleted().cloned().unwrap();
    assert_eq!(kept.title, "gamma");
    assert_eq!(kept.color, NoteColor::Color4);

    vm.on_event(NotesEvent::UndoDelete).unwrap();
    assert_eq!(titles(&vm.ui_state().notes), vec!["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn selector_events_wake_observer_without_writes() {
    let mut vm = NotesViewModel::with_order(
        NoteService::new(seeded_repo()),
        NoteOrder::new(SortKey::Title, SortMode::Ascending),
    );
    vm.ui_state();

    vm.on_event(NotesEvent::SetSortKey(SortKey::Timestamp)).unwrap();
    let state = vm.next_ui_state().await.unwrap();
    assert_eq!(titles(&state.notes), vec!["gamma", "beta", "alpha"]);

    vm.on_event(NotesEvent::SetSortMode(SortMode::Descending))
        .unwrap();
    let state = vm.next_ui_state().await.unwrap();
    assert_eq!(titles(&state.notes), vec!["alpha", "beta", "gamma"]);
    assert_eq!(state.sort_mode, SortMode::Descending);
}

#[tokio::test]
async fn reselecting_current_key_does_not_wake() {
    let mut vm = NotesViewModel::new(NoteService::new(seeded_repo()));
    vm.ui_state();

    vm.on_event(NotesEvent::SetSortKey(SortKey::Title)).unwrap();
    vm.on_event(NotesEvent::SetSortPanelVisible(false)).unwrap();
    let woke = tokio::time::timeout(Duration::from_millis(20), vm.changed()).await;
    assert!(woke.is_err());
}

#[tokio::test]
async fn panel_toggle_wakes_observer() {
    let mut vm = NotesViewModel::new(NoteService::new(seeded_repo()));
    vm.ui_state();

    vm.on_event(NotesEvent::ToggleSortPanel).unwrap();
    let state = vm.next_ui_state().await.unwrap();
    assert!(state.sort_panel_visible);
}

#[test]
fn edits_from_add_edit_screen_show_up_in_list() {
    let repo = seeded_repo();
    let mut list = NotesViewModel::new(NoteService::new(Arc::clone(&repo)));

    let mut editor = AddEditNoteViewModel::load(NoteService::new(Arc::clone(&repo)), 3)
        .unwrap()
        .with_clock(|| 5_000);
    editor
        .on_event(AddEditNoteEvent::EnteredTitle("aardvark".to_string()))
        .unwrap();
    let saved_id = editor.on_event(AddEditNoteEvent::Save).unwrap();
    assert_eq!(saved_id, Some(3));

    let mut creator =
        AddEditNoteViewModel::new(NoteService::new(Arc::clone(&repo)), Note::default());
    creator
        .on_event(AddEditNoteEvent::EnteredTitle("delta".to_string()))
        .unwrap();
    creator
        .on_event(AddEditNoteEvent::EnteredContent("d".to_string()))
        .unwrap();
    let created_id = creator.save().unwrap();
    assert!(created_id > 3);

    let state = list.ui_state();
    assert_eq!(
        titles(&state.notes),
        vec!["aardvark", "alpha", "beta", "delta"]
    );
    assert_eq!(state.notes[0].timestamp, 5_000);
}

#[test]
fn add_edit_rejects_blank_content() {
    let mut vm = AddEditNoteViewModel::new(
        NoteService::new(InMemoryNoteRepository::new()),
        Note::default(),
    );
    vm.on_event(AddEditNoteEvent::EnteredTitle("title".to_string()))
        .unwrap();

    let err = vm.save().unwrap_err();
    assert!(matches!(err, AddEditNoteError::EmptyContent));
}

#[test]
fn loading_missing_note_is_not_found() {
    let repo = SqliteNoteRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    let result = AddEditNoteViewModel::load(NoteService::new(repo), 8);
    assert!(matches!(result, Err(NoteServiceError::NoteNotFound(8))));
}
