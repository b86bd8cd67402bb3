//! UI-agnostic screen state holders.
//!
//! # Responsibility
//! - Turn screen events into use-case calls.
//! - Expose render-ready state without depending on any UI toolkit.

pub mod add_edit;
pub mod notes;
