//! Note repository contract.
//!
//! # Responsibility
//! - Define the storage-agnostic data access contract used by use-cases.
//! - Define repository error semantics shared by all adapters.
//!
//! # Invariants
//! - `observe_notes` always yields the latest full snapshot; intermediate
//!   snapshots may be skipped by slow observers.
//! - `insert_notes` replaces by id; id `0` receives a fresh id.
//! - `delete_note` of an absent id is a no-op and emits no new snapshot.
//! - `get_note_by_id` fails with `NotFound` instead of returning a placeholder.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::watch;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "connection is missing required column `{table}.{column}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note storage.
pub trait NoteRepository {
    /// Subscribes to the full note list. The receiver starts at the current
    /// snapshot.
    fn observe_notes(&self) -> watch::Receiver<Vec<Note>>;
    /// Gets one note by id.
    fn get_note_by_id(&self, id: NoteId) -> RepoResult<Note>;
    /// Inserts or replaces notes and returns their effective ids in input
    /// order.
    fn insert_notes(&self, notes: &[Note]) -> RepoResult<Vec<NoteId>>;
    /// Removes the stored note with the same id, if any.
    fn delete_note(&self, note: &Note) -> RepoResult<()>;
}

impl<R: NoteRepository + ?Sized> NoteRepository for Arc<R> {
    fn observe_notes(&self) -> watch::Receiver<Vec<Note>> {
        (**self).observe_notes()
    }

    fn get_note_by_id(&self, id: NoteId) -> RepoResult<Note> {
        (**self).get_note_by_id(id)
    }

    fn insert_notes(&self, notes: &[Note]) -> RepoResult<Vec<NoteId>> {
        (**self).insert_notes(notes)
    }

    fn delete_note(&self, note: &Note) -> RepoResult<()> {
        (**self).delete_note(note)
    }
}
