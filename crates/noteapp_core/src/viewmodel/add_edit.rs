//! Add/edit note view-model.
//!
//! # Responsibility
//! - Hold the draft note edited by the add/edit screen.
//! - Validate and persist the draft on save.
//!
//! # Invariants
//! - A draft with id `0` is created on save; any other id is replaced.
//! - Saving stamps the draft with the current epoch-millisecond time.

use crate::model::note::{Note, NoteColor, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// User intents emitted by the add/edit screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddEditNoteEvent {
    EnteredTitle(String),
    EnteredContent(String),
    ChangeColor(NoteColor),
    Save,
}

/// Save rejection or persistence failure.
#[derive(Debug)]
pub enum AddEditNoteError {
    EmptyTitle,
    EmptyContent,
    Service(NoteServiceError),
}

impl Display for AddEditNoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("note title cannot be empty"),
            Self::EmptyContent => f.write_str("note content cannot be empty"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AddEditNoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteServiceError> for AddEditNoteError {
    fn from(value: NoteServiceError) -> Self {
        Self::Service(value)
    }
}

/// View-model backing the add/edit screen.
pub struct AddEditNoteViewModel<R: NoteRepository> {
    service: NoteService<R>,
    draft: Note,
    clock: fn() -> i64,
}

impl<R: NoteRepository> AddEditNoteViewModel<R> {
    /// Starts editing `note`; pass `Note::default()` to add a new one.
    pub fn new(service: NoteService<R>, note: Note) -> Self {
        Self {
            service,
            draft: note,
            clock: now_epoch_ms,
        }
    }

    /// Starts editing the stored note with `id`.
    pub fn load(service: NoteService<R>, id: NoteId) -> Result<Self, NoteServiceError> {
        let note = service.get_note_by_id(id)?;
        Ok(Self::new(service, note))
    }

    /// Replaces the time source used to stamp saved notes.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Current draft.
    pub fn draft(&self) -> &Note {
        &self.draft
    }

    /// Applies one screen event. `Save` returns the persisted id.
    pub fn on_event(&mut self, event: AddEditNoteEvent) -> Result<Option<NoteId>, AddEditNoteError> {
        match event {
            AddEditNoteEvent::EnteredTitle(title) => self.draft.title = title,
            AddEditNoteEvent::EnteredContent(content) => self.draft.content = content,
            AddEditNoteEvent::ChangeColor(color) => self.draft.color = color,
            AddEditNoteEvent::Save => return self.save().map(Some),
        }
        Ok(None)
    }

    /// Validates and persists the draft.
    pub fn save(&mut self) -> Result<NoteId, AddEditNoteError> {
        if self.draft.title.trim().is_empty() {
            return Err(AddEditNoteError::EmptyTitle);
        }
        if self.draft.content.trim().is_empty() {
            return Err(AddEditNoteError::EmptyContent);
        }

        let created = self.draft.is_new();
        let mut note = self.draft.clone();
        note.timestamp = (self.clock)();
        let id = self.service.insert_note(&note)?;
        note.id = id;
        self.draft = note;

        info!(
            "event=note_save module=viewmodel status=ok note_id={} created={}",
            id, created
        );
        Ok(id)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
