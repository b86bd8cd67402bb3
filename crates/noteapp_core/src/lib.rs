//! Core domain logic for the note app.
//! This crate is the single source of truth for note list and edit behavior.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod viewmodel;

pub use config::AppConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LogSettings,
    LoggingError,
};
pub use model::note::{
    Note, NoteColor, NoteId, NoteOrder, ParseNoteColorError, ParseSortKeyError,
    ParseSortModeError, SortKey, SortMode, NEW_NOTE_ID,
};
pub use repo::memory_note_repo::InMemoryNoteRepository;
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult};
pub use repo::sqlite_note_repo::SqliteNoteRepository;
pub use service::note_service::{NoteService, NoteServiceError};
pub use service::sorted_notes::{NotesStreamClosed, SortedNotes};
pub use viewmodel::add_edit::{AddEditNoteError, AddEditNoteEvent, AddEditNoteViewModel};
pub use viewmodel::notes::{NotesEvent, NotesUiState, NotesViewModel};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
