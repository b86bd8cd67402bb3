//! Note domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Define list ordering selectors shared by use-cases and view-models.
//!
//! # Invariants
//! - Persisted notes are identified by a unique non-zero `NoteId`.
//! - Deletion is a hard delete; undo re-inserts the removed record.

pub mod note;
