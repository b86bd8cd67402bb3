//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note list/edit use-cases to the mobile shell via FRB.
//! - Keep error semantics simple: envelopes with `ok` + message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The last deleted note is held process-wide until undone or replaced.

use noteapp_core::db::open_db;
use log::{debug, error};
use noteapp_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AddEditNoteViewModel, AppConfig, LogSettings, Note, NoteColor, NoteId, NoteOrder,
    NoteService, NoteServiceError, SortKey, SortMode, SqliteNoteRepository,
};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static RECENTLY_DELETED: Mutex<Option<Note>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let started =
        LogSettings::new(&level, log_dir.trim()).and_then(|settings| init_logging_inner(&settings));
    match started {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Note row returned to the list and edit screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// `color_1..color_5`.
    pub color: String,
}

/// Sorted list response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub items: Vec<NoteItem>,
    /// Effective sort key after fallback.
    pub sort_key: String,
    /// Effective sort mode after fallback.
    pub sort_mode: String,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected note id.
    pub note_id: Option<i64>,
    /// Note snapshot, for `note_get`.
    pub note: Option<NoteItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: NoteId) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            note: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            note: None,
            message: message.into(),
        }
    }
}

/// Lists all notes sorted by `sort_key` (`title|timestamp|color`) and
/// `sort_mode` (`asc|desc`).
///
/// # FFI contract
/// - Unknown selector text falls back to defaults; `message` reports it.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(sort_key: String, sort_mode: String) -> NotesListResponse {
    let mut warnings = Vec::new();
    let key = sort_key.parse::<SortKey>().unwrap_or_else(|err| {
        warnings.push(err.to_string());
        SortKey::default()
    });
    let mode = sort_mode.parse::<SortMode>().unwrap_or_else(|err| {
        warnings.push(err.to_string());
        SortMode::default()
    });

    let listed = with_note_service("notes_list", |service| {
        let mut notes = service.observe_notes().borrow().clone();
        NoteOrder::new(key, mode).sort(&mut notes);
        Ok::<_, NoteServiceError>(notes)
    });

    match listed {
        Ok(notes) => {
            let items = notes.into_iter().map(to_note_item).collect::<Vec<_>>();
            let mut message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", items.len())
            };
            for warning in warnings {
                message.push_str(&format!(" Fallback: {warning}."));
            }
            NotesListResponse {
                items,
                sort_key: key.to_string(),
                sort_mode: mode.to_string(),
                message,
            }
        }
        Err(err) => NotesListResponse {
            items: Vec::new(),
            sort_key: key.to_string(),
            sort_mode: mode.to_string(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Gets one note by id.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(id: i64) -> NoteActionResponse {
    match with_note_service("note_get", |service| service.get_note_by_id(id)) {
        Ok(note) => NoteActionResponse {
            ok: true,
            note_id: Some(note.id),
            note: Some(to_note_item(note)),
            message: "Note loaded.".to_string(),
        },
        Err(err) => NoteActionResponse::failure(format!("note_get failed: {err}")),
    }
}

/// Creates (`id == 0`) or replaces a note.
///
/// # FFI contract
/// - Blank title or content is rejected.
/// - `color` accepts `color_1..color_5` or `1..5`.
/// - `timestamp` is stamped by the add/edit view-model.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save(id: i64, title: String, content: String, color: String) -> NoteActionResponse {
    let color = match color.parse::<NoteColor>() {
        Ok(color) => color,
        Err(err) => return NoteActionResponse::failure(format!("note_save failed: {err}")),
    };

    let draft = Note::with_id(id, title, content, 0, color);
    match with_note_service("note_save", |service| {
        AddEditNoteViewModel::new(service, draft).save()
    }) {
        Ok(saved_id) => NoteActionResponse::success("Note saved.", saved_id),
        Err(err) => NoteActionResponse::failure(format!("note_save failed: {err}")),
    }
}

/// Deletes a note and keeps it for `note_undo_delete`.
///
/// Deleting an unknown id succeeds without changing anything.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: i64) -> NoteActionResponse {
    let deleted = with_note_service("note_delete", |service| {
        let existing = match service.get_note_by_id(id) {
            Ok(note) => Some(note),
            Err(NoteServiceError::NoteNotFound(_)) => None,
            Err(err) => return Err(err),
        };
        if let Some(note) = existing.as_ref() {
            service.delete_note(note)?;
        }
        Ok(existing)
    });

    match deleted {
        Ok(Some(note)) => {
            store_recently_deleted(Some(note));
            NoteActionResponse::success("Note deleted.", id)
        }
        Ok(None) => NoteActionResponse::success("Nothing to delete.", id),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Re-inserts the last deleted note.
#[flutter_rust_bridge::frb(sync)]
pub fn note_undo_delete() -> NoteActionResponse {
    let Some(note) = take_recently_deleted() else {
        return NoteActionResponse::failure("note_undo_delete failed: nothing to undo");
    };

    match with_note_service("note_undo_delete", |service| service.insert_note(&note)) {
        Ok(id) => NoteActionResponse::success("Note restored.", id),
        Err(err) => {
            store_recently_deleted(Some(note));
            NoteActionResponse::failure(format!("note_undo_delete failed: {err}"))
        }
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| AppConfig::from_env().db_path)
        .clone()
}

fn with_note_service<T, E: Display>(
    op: &'static str,
    f: impl FnOnce(NoteService<SqliteNoteRepository>) -> Result<T, E>,
) -> Result<T, String> {
    let result = open_note_service().and_then(|service| f(service).map_err(|err| err.to_string()));
    match &result {
        Ok(_) => debug!("event=ffi_call module=ffi op={op} status=ok"),
        Err(err) => error!("event=ffi_call module=ffi op={op} status=error error={err}"),
    }
    result
}

fn open_note_service() -> Result<NoteService<SqliteNoteRepository>, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("note DB open failed: {err}"))?;
    let repo =
        SqliteNoteRepository::try_new(conn).map_err(|err| format!("note repo init failed: {err}"))?;
    Ok(NoteService::new(repo))
}

fn store_recently_deleted(note: Option<Note>) {
    match RECENTLY_DELETED.lock() {
        Ok(mut slot) => *slot = note,
        Err(poisoned) => *poisoned.into_inner() = note,
    }
}

fn take_recently_deleted() -> Option<Note> {
    match RECENTLY_DELETED.lock() {
        Ok(mut slot) => slot.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

fn to_note_item(note: Note) -> NoteItem {
    NoteItem {
        id: note.id,
        title: note.title,
        content: note.content,
        timestamp: note.timestamp,
        color: note.color.as_str().to_string(),
    }
}
