//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the use-case oriented note access contract.
//! - Isolate storage details (SQLite, in-memory) from use-cases and
//!   view-models.
//!
//! # Invariants
//! - Every adapter exposes the same observable-list semantics.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod memory_note_repo;
pub mod note_repo;
pub mod sqlite_note_repo;
