//! SQLite note repository.
//!
//! # Responsibility
//! - Persist notes in the `notes` table of a migrated connection.
//! - Republish the full list to observers after every effective write.
//!
//! # Invariants
//! - A batch insert is applied in a single transaction; observers never see
//!   half of a batch.
//! - Published snapshots are ordered by `id ASC` (insertion order).
//! - A delete that matches no row publishes nothing.
//! - A committed write is reported as successful even when re-reading the
//!   list for observers fails; observers then keep the previous snapshot.

use crate::model::note::{Note, NoteColor, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::watch;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    timestamp,
    color
FROM notes";

const REQUIRED_NOTE_COLUMNS: [&str; 5] = ["id", "title", "content", "timestamp", "color"];

/// SQLite-backed note repository.
///
/// Owns its connection so observers can outlive any caller borrow.
pub struct SqliteNoteRepository {
    conn: Connection,
    notes: watch::Sender<Vec<Note>>,
}

impl SqliteNoteRepository {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(&conn)?;
        let snapshot = load_all_notes(&conn)?;
        Ok(Self {
            conn,
            notes: watch::Sender::new(snapshot),
        })
    }

    /// Releases the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn publish(&self) {
        match load_all_notes(&self.conn) {
            Ok(snapshot) => {
                self.notes.send_replace(snapshot);
            }
            Err(err) => error!("event=note_publish module=repo status=error error={err}"),
        }
    }
}

impl NoteRepository for SqliteNoteRepository {
    fn observe_notes(&self) -> watch::Receiver<Vec<Note>> {
        self.notes.subscribe()
    }

    fn get_note_by_id(&self, id: NoteId) -> RepoResult<Note> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let note = stmt.query_row([id], parse_note_row).optional()?;
        match note {
            Some(row) => row,
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn insert_notes(&self, notes: &[Note]) -> RepoResult<Vec<NoteId>> {
        if notes.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(notes.len());
        for note in notes {
            if note.is_new() {
                tx.execute(
                    "INSERT INTO notes (title, content, timestamp, color)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![
                        note.title.as_str(),
                        note.content.as_str(),
                        note.timestamp,
                        note.color.as_str(),
                    ],
                )?;
                ids.push(tx.last_insert_rowid());
            } else {
                tx.execute(
                    "INSERT OR REPLACE INTO notes (id, title, content, timestamp, color)
                     VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        note.id,
                        note.title.as_str(),
                        note.content.as_str(),
                        note.timestamp,
                        note.color.as_str(),
                    ],
                )?;
                ids.push(note.id);
            }
        }
        tx.commit()?;

        debug!(
            "event=note_insert module=repo status=ok backend=sqlite count={}",
            ids.len()
        );
        self.publish();
        Ok(ids)
    }

    fn delete_note(&self, note: &Note) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [note.id])?;

        debug!(
            "event=note_delete module=repo status=ok backend=sqlite removed={}",
            changed > 0
        );
        if changed > 0 {
            self.publish();
        }
        Ok(())
    }
}

fn load_all_notes(conn: &Connection) -> RepoResult<Vec<Note>> {
    let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(parse_note_row(row)??);
    }
    Ok(notes)
}

// Outer result carries SQLite column errors, inner carries domain decoding.
fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<RepoResult<Note>> {
    let color_text: String = row.get("color")?;
    let color = match color_text.parse::<NoteColor>() {
        Ok(color) => color,
        Err(_) => {
            return Ok(Err(RepoError::InvalidData(format!(
                "invalid note color `{color_text}` in notes.color"
            ))));
        }
    };

    Ok(Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        timestamp: row.get("timestamp")?,
        color,
    }))
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::MissingRequiredTable("notes"));
    }

    for column in REQUIRED_NOTE_COLUMNS {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
