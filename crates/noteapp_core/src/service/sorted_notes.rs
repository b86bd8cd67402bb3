//! Sorted note list use-case.
//!
//! # Responsibility
//! - Combine the repository list stream with the sort key/mode streams.
//! - Produce the latest list snapshot sorted by `(key, mode)`.
//!
//! # Invariants
//! - Every produced list is a permutation of the latest repository snapshot.
//! - A selector change re-sorts without any repository write.
//! - Closing a selector stream freezes that selector; only closing the note
//!   stream ends observation.

use crate::model::note::{Note, NoteOrder, SortKey, SortMode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::watch;

/// The note source behind a sorted view was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotesStreamClosed;

impl Display for NotesStreamClosed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("note stream closed")
    }
}

impl Error for NotesStreamClosed {}

/// Observable, sorted projection of the note list.
pub struct SortedNotes {
    notes: watch::Receiver<Vec<Note>>,
    key: watch::Receiver<SortKey>,
    mode: watch::Receiver<SortMode>,
    key_open: bool,
    mode_open: bool,
}

enum Wake {
    Notes(bool),
    Key(bool),
    Mode(bool),
}

impl SortedNotes {
    /// Builds the projection. The first `current()` reflects all inputs as
    /// they are now.
    pub fn new(
        notes: watch::Receiver<Vec<Note>>,
        key: watch::Receiver<SortKey>,
        mode: watch::Receiver<SortMode>,
    ) -> Self {
        Self {
            notes,
            key,
            mode,
            key_open: true,
            mode_open: true,
        }
    }

    /// Ordering currently selected by the key/mode streams.
    pub fn order(&self) -> NoteOrder {
        NoteOrder::new(*self.key.borrow(), *self.mode.borrow())
    }

    /// Returns the latest snapshot sorted by the latest selectors and marks
    /// every input as seen.
    pub fn current(&mut self) -> Vec<Note> {
        let key = *self.key.borrow_and_update();
        let mode = *self.mode.borrow_and_update();
        let order = NoteOrder::new(key, mode);
        let mut notes = self.notes.borrow_and_update().clone();
        order.sort(&mut notes);
        notes
    }

    /// Waits until the list or a selector changed since the last `current()`.
    pub async fn changed(&mut self) -> Result<(), NotesStreamClosed> {
        loop {
            let key_open = self.key_open;
            let mode_open = self.mode_open;
            let wake = tokio::select! {
                result = self.notes.changed() => Wake::Notes(result.is_ok()),
                result = self.key.changed(), if key_open => Wake::Key(result.is_ok()),
                result = self.mode.changed(), if mode_open => Wake::Mode(result.is_ok()),
            };

            match wake {
                Wake::Notes(true) | Wake::Key(true) | Wake::Mode(true) => return Ok(()),
                Wake::Notes(false) => return Err(NotesStreamClosed),
                Wake::Key(false) => self.key_open = false,
                Wake::Mode(false) => self.mode_open = false,
            }
        }
    }

    /// Waits for the next change and returns the fresh sorted snapshot.
    ///
    /// Returns `None` once the note source is gone.
    pub async fn next(&mut self) -> Option<Vec<Note>> {
        self.changed().await.ok()?;
        Some(self.current())
    }
}
