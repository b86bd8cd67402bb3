//! FFI bridge crate for the mobile UI shell.

pub mod api;
