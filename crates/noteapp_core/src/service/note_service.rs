//! Note use-case service.
//!
//! # Responsibility
//! - Provide insert/delete/get use-cases over any `NoteRepository`.
//! - Wire the sorted-list use-case to the repository stream.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Deleting an absent note is a successful no-op.
//! - Undo is the caller re-inserting the deleted note; no log is kept here.

use crate::model::note::{Note, NoteId, SortKey, SortMode};
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::service::sorted_notes::SortedNotes;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::watch;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and result.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Note service facade over repository implementations.
#[derive(Clone)]
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Subscribes to the unsorted repository list.
    pub fn observe_notes(&self) -> watch::Receiver<Vec<Note>> {
        self.repo.observe_notes()
    }

    /// Sorted list use-case driven by key/mode streams.
    pub fn sorted_notes(
        &self,
        key: watch::Receiver<SortKey>,
        mode: watch::Receiver<SortMode>,
    ) -> SortedNotes {
        SortedNotes::new(self.repo.observe_notes(), key, mode)
    }

    /// Gets one note by id; a missing id is an error, never a default note.
    pub fn get_note_by_id(&self, id: NoteId) -> Result<Note, NoteServiceError> {
        Ok(self.repo.get_note_by_id(id)?)
    }

    /// Inserts or replaces notes and returns their ids in input order.
    pub fn insert_notes(&self, notes: &[Note]) -> Result<Vec<NoteId>, NoteServiceError> {
        match self.repo.insert_notes(notes) {
            Ok(ids) => {
                info!(
                    "event=note_insert module=service status=ok count={}",
                    ids.len()
                );
                if ids.len() != notes.len() {
                    return Err(NoteServiceError::InconsistentState(
                        "insert returned a different number of ids",
                    ));
                }
                Ok(ids)
            }
            Err(err) => {
                error!(
                    "event=note_insert module=service status=error count={} error={err}",
                    notes.len()
                );
                Err(err.into())
            }
        }
    }

    /// Inserts or replaces one note.
    pub fn insert_note(&self, note: &Note) -> Result<NoteId, NoteServiceError> {
        self.insert_notes(std::slice::from_ref(note))?
            .into_iter()
            .next()
            .ok_or(NoteServiceError::InconsistentState(
                "insert returned no id",
            ))
    }

    /// Deletes the stored note with the same id, if present.
    pub fn delete_note(&self, note: &Note) -> Result<(), NoteServiceError> {
        if let Err(err) = self.repo.delete_note(note) {
            error!(
                "event=note_delete module=service status=error note_id={} error={err}",
                note.id
            );
            return Err(err.into());
        }
        info!(
            "event=note_delete module=service status=ok note_id={}",
            note.id
        );
        Ok(())
    }
}
