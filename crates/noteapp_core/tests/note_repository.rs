use noteapp_core::db::{open_db, open_db_in_memory};
use noteapp_core::{
    InMemoryNoteRepository, Note, NoteColor, NoteRepository, RepoError, SqliteNoteRepository,
};

fn seed() -> Vec<Note> {
    vec![
        Note::with_id(1, "note1", "note content1", 1_000, NoteColor::Color1),
        Note::with_id(2, "note2", "note content2", 2_000, NoteColor::Color3),
    ]
}

fn sqlite_repo_with_seed() -> SqliteNoteRepository {
    let repo = SqliteNoteRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    repo.insert_notes(&seed()).unwrap();
    repo
}

fn assert_contract<R: NoteRepository>(repo: &R) {
    let rx = repo.observe_notes();
    assert_eq!(rx.borrow().len(), 2);

    let note = repo.get_note_by_id(2).unwrap();
    assert_eq!(note.title, "note2");
    assert_eq!(note.color, NoteColor::Color3);
    assert!(matches!(
        repo.get_note_by_id(404).unwrap_err(),
        RepoError::NotFound(404)
    ));

    let ids = repo
        .insert_notes(&[
            Note::new("fresh a", "", 3_000, NoteColor::Color2),
            Note::new("fresh b", "", 4_000, NoteColor::Color5),
        ])
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| *id > 2));
    assert_ne!(ids[0], ids[1]);
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow().len(), 4);

    repo.delete_note(&Note::with_id(ids[0], "", "", 0, NoteColor::Color1))
        .unwrap();
    assert_eq!(rx.borrow().len(), 3);
    assert!(matches!(
        repo.get_note_by_id(ids[0]).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn in_memory_repository_satisfies_contract() {
    assert_contract(&InMemoryNoteRepository::with_notes(seed()).unwrap());
}

#[test]
fn sqlite_repository_satisfies_contract() {
    assert_contract(&sqlite_repo_with_seed());
}

#[test]
fn sqlite_delete_of_absent_note_publishes_nothing() {
    let repo = sqlite_repo_with_seed();
    let rx = repo.observe_notes();

    repo.delete_note(&Note::with_id(99, "", "", 0, NoteColor::Color1))
        .unwrap();
    assert!(!rx.has_changed().unwrap());
    assert_eq!(rx.borrow().len(), 2);
}

#[test]
fn sqlite_reinsert_restores_deleted_note_with_same_id() {
    let repo = sqlite_repo_with_seed();
    let deleted = repo.get_note_by_id(1).unwrap();

    repo.delete_note(&deleted).unwrap();
    repo.insert_notes(std::slice::from_ref(&deleted)).unwrap();

    assert_eq!(repo.get_note_by_id(1).unwrap(), deleted);
    assert_eq!(repo.observe_notes().borrow().len(), 2);
}

#[test]
fn sqlite_notes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let created_id = {
        let repo = SqliteNoteRepository::try_new(open_db(&path).unwrap()).unwrap();
        repo.insert_notes(&[Note::new("kept", "body", 10, NoteColor::Color4)])
            .unwrap()[0]
    };

    let repo = SqliteNoteRepository::try_new(open_db(&path).unwrap()).unwrap();
    let loaded = repo.get_note_by_id(created_id).unwrap();
    assert_eq!(loaded.title, "kept");
    assert_eq!(loaded.content, "body");
    assert_eq!(loaded.timestamp, 10);
    assert_eq!(loaded.color, NoteColor::Color4);
}

#[test]
fn sqlite_rejects_corrupted_color_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO notes (title, content, timestamp, color) VALUES ('t', 'c', 0, 'plaid');",
    )
    .unwrap();

    let err = SqliteNoteRepository::try_new(conn).err().unwrap();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn sqlite_committed_insert_succeeds_when_republish_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    let repo = SqliteNoteRepository::try_new(open_db(&path).unwrap()).unwrap();
    let rx = repo.observe_notes();

    let other = rusqlite::Connection::open(&path).unwrap();
    other
        .execute_batch(
            "PRAGMA ignore_check_constraints = ON;
             INSERT INTO notes (title, content, timestamp, color) VALUES ('t', 'c', 0, 'plaid');",
        )
        .unwrap();
    drop(other);

    let ids = repo
        .insert_notes(&[Note::new("after", "body", 5, NoteColor::Color2)])
        .unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(repo.get_note_by_id(ids[0]).unwrap().title, "after");
    assert!(!rx.has_changed().unwrap());
    assert!(rx.borrow().is_empty());
}
