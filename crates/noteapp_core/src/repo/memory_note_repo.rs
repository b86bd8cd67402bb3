//! In-memory note repository.
//!
//! # Responsibility
//! - Back the note contract with a process-local list, for tests and
//!   ephemeral sessions.
//!
//! # Invariants
//! - The watch channel value is the only copy of the list.
//! - Generated ids are strictly greater than every id seen so far.
//! - Running out of ids fails the whole batch; ids never wrap.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use log::debug;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::watch;

/// Note repository that keeps everything in memory.
pub struct InMemoryNoteRepository {
    notes: watch::Sender<Vec<Note>>,
    last_id: AtomicI64,
}

impl InMemoryNoteRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            notes: watch::Sender::new(Vec::new()),
            last_id: AtomicI64::new(0),
        }
    }

    /// Creates a repository seeded with notes, kept in given order.
    ///
    /// The seed goes through `insert_notes` as one batch, so notes with id `0`
    /// receive generated ids.
    pub fn with_notes(seed: Vec<Note>) -> RepoResult<Self> {
        let repo = Self::new();
        repo.insert_notes(&seed)?;
        Ok(repo)
    }

    fn next_id(&self) -> RepoResult<NoteId> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| last + 1)
            .map_err(|_| RepoError::InvalidData("note id space exhausted".to_string()))
    }

    fn bump_last_id(&self, id: NoteId) {
        self.last_id.fetch_max(id, Ordering::SeqCst);
    }
}

impl Default for InMemoryNoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn observe_notes(&self) -> watch::Receiver<Vec<Note>> {
        self.notes.subscribe()
    }

    fn get_note_by_id(&self, id: NoteId) -> RepoResult<Note> {
        self.notes
            .borrow()
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }

    fn insert_notes(&self, notes: &[Note]) -> RepoResult<Vec<NoteId>> {
        if notes.is_empty() {
            return Ok(Vec::new());
        }

        // Ids are settled before the list is touched, so a failed batch
        // leaves the observed list as it was.
        let mut prepared = Vec::with_capacity(notes.len());
        for note in notes {
            let mut note = note.clone();
            if note.is_new() {
                note.id = self.next_id()?;
            } else {
                self.bump_last_id(note.id);
            }
            prepared.push(note);
        }
        let ids: Vec<NoteId> = prepared.iter().map(|note| note.id).collect();

        self.notes.send_modify(|stored| {
            for note in prepared {
                match stored.iter_mut().find(|current| current.id == note.id) {
                    Some(slot) => *slot = note,
                    None => stored.push(note),
                }
            }
        });

        debug!(
            "event=note_insert module=repo status=ok backend=memory count={}",
            ids.len()
        );
        Ok(ids)
    }

    fn delete_note(&self, note: &Note) -> RepoResult<()> {
        let removed = self.notes.send_if_modified(|stored| {
            let before = stored.len();
            stored.retain(|current| current.id != note.id);
            stored.len() != before
        });

        debug!(
            "event=note_delete module=repo status=ok backend=memory removed={}",
            removed
        );
        Ok(())
    }
}
