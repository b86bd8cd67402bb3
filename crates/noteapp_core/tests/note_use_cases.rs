use noteapp_core::db::open_db_in_memory;
use noteapp_core::{
    InMemoryNoteRepository, Note, NoteColor, NoteService, NoteServiceError, SortKey, SortMode,
    SqliteNoteRepository,
};
use tokio::sync::watch;

fn starting_notes() -> Vec<Note> {
    vec![
        Note::with_id(1, "note1", "note content1", 1_000, NoteColor::Color1),
        Note::with_id(2, "note2", "note content2", 1_000, NoteColor::Color3),
    ]
}

fn mixed_notes() -> Vec<Note> {
    vec![
        Note::with_id(1, "pear", "", 300, NoteColor::Color2),
        Note::with_id(2, "apple", "", 100, NoteColor::Color5),
        Note::with_id(3, "zucchini", "", 200, NoteColor::Color1),
        Note::with_id(4, "banana", "", 100, NoteColor::Color3),
        Note::with_id(5, "apple", "", 400, NoteColor::Color2),
    ]
}

#[tokio::test]
async fn delete_twice_then_insert_tracks_list_size() {
    let repo = InMemoryNoteRepository::with_notes(starting_notes()).unwrap();
    let service = NoteService::new(repo);
    let (_key_tx, key_rx) = watch::channel(SortKey::Title);
    let (_mode_tx, mode_rx) = watch::channel(SortMode::Ascending);
    let mut sorted = service.sorted_notes(key_rx, mode_rx);
    assert_eq!(sorted.current().len(), 2);

    service.delete_note(&Note::with_id(1, "", "", 0, NoteColor::Color1)).unwrap();
    assert_eq!(sorted.next().await.unwrap().len(), 1);

    service.delete_note(&Note::with_id(1, "", "", 0, NoteColor::Color1)).unwrap();
    assert_eq!(sorted.current().len(), 1);

    service.insert_note(&Note::with_id(3, "", "", 0, NoteColor::Color1)).unwrap();
    assert_eq!(sorted.next().await.unwrap().len(), 2);
}

#[test]
fn every_key_and_mode_orders_by_attribute() {
    let repo = InMemoryNoteRepository::with_notes(mixed_notes()).unwrap();
    let service = NoteService::new(repo);

    for key in [SortKey::Title, SortKey::Timestamp, SortKey::Color] {
        let (_key_tx, key_rx) = watch::channel(key);
        let (_asc_tx, asc_rx) = watch::channel(SortMode::Ascending);
        let ascending = service.sorted_notes(key_rx.clone(), asc_rx).current();
        let (_desc_tx, desc_rx) = watch::channel(SortMode::Descending);
        let descending = service.sorted_notes(key_rx, desc_rx).current();

        assert_eq!(ascending.len(), 5);
        assert!(
            ascending
                .windows(2)
                .all(|pair| key.comparator()(&pair[0], &pair[1]).is_le()),
            "{key} ascending"
        );
        assert!(
            descending
                .windows(2)
                .all(|pair| key.comparator()(&pair[0], &pair[1]).is_ge()),
            "{key} descending"
        );
    }
}

#[test]
fn insert_many_grows_observed_list_by_count() {
    let repo = InMemoryNoteRepository::with_notes(starting_notes()).unwrap();
    let service = NoteService::new(repo);
    let rx = service.observe_notes();

    let batch: Vec<_> = (0..5)
        .map(|idx| Note::new(format!("batch {idx}"), "", idx, NoteColor::Color2))
        .collect();
    let ids = service.insert_notes(&batch).unwrap();

    assert_eq!(ids.len(), 5);
    assert_eq!(rx.borrow().len(), 7);
}

#[test]
fn missing_note_lookup_fails_loudly() {
    let repo = SqliteNoteRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    let service = NoteService::new(repo);

    let err = service.get_note_by_id(17).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(17)));
}

#[tokio::test]
async fn sqlite_backed_sort_reacts_to_writes_and_selectors() {
    let repo = SqliteNoteRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    let service = NoteService::new(repo);
    service.insert_notes(&mixed_notes()).unwrap();

    let (key_tx, key_rx) = watch::channel(SortKey::Timestamp);
    let (_mode_tx, mode_rx) = watch::channel(SortMode::Descending);
    let mut sorted = service.sorted_notes(key_rx, mode_rx);
    let first: Vec<_> = sorted.current().iter().map(|note| note.timestamp).collect();
    assert_eq!(first, vec![400, 300, 200, 100, 100]);

    service
        .insert_note(&Note::new("late", "", 999, NoteColor::Color4))
        .unwrap();
    let after_insert = sorted.next().await.unwrap();
    assert_eq!(after_insert[0].title, "late");

    key_tx.send_replace(SortKey::Color);
    let by_color = sorted.next().await.unwrap();
    assert_eq!(by_color[0].color, NoteColor::Color5);
    assert_eq!(by_color.last().unwrap().color, NoteColor::Color1);
}
