use draftpad_core::db::open_db_in_memory;
use draftpad_core::{Note, NoteStore, StoreError};

fn store() -> NoteStore {
    NoteStore::new(open_db_in_memory().unwrap())
}

#[tokio::test]
async fn insert_with_sentinel_id_assigns_fresh_ids() {
    let store = store();

    let first = store
        .upsert(Note::new("first".to_string(), None, None))
        .await
        .unwrap();
    let second = store
        .upsert(Note::new("second".to_string(), None, None))
        .await
        .unwrap();

    assert!(first > 0);
    assert!(second > first);

    let notes = store.get_notes().await.unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, first);
    assert_eq!(notes[1].id, second);
}

#[tokio::test]
async fn upsert_with_existing_id_replaces_instead_of_duplicating() {
    let store = store();

    let id = store
        .upsert(Note::new(
            "draft".to_string(),
            "v1".to_string(),
            "2023-01-01".to_string(),
        ))
        .await
        .unwrap();

    let replaced_id = store
        .upsert(Note::with_id(
            id,
            "draft".to_string(),
            "v2".to_string(),
            "2023-01-02".to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(replaced_id, id);

    let notes = store.get_notes().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content.as_deref(), Some("v2"));
    assert_eq!(notes[0].date_stamp.as_deref(), Some("2023-01-02"));
}

#[tokio::test]
async fn get_note_reports_missing_id_as_not_found() {
    let store = store();

    let err = store.get_note(42).await.unwrap_err();
    match err {
        StoreError::NotFound(id) => assert_eq!(id, 42),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn delete_removes_only_the_targeted_note() {
    let store = store();

    let keep = store
        .upsert(Note::new("keep".to_string(), None, None))
        .await
        .unwrap();
    let doomed = store
        .upsert(Note::new("drop".to_string(), None, None))
        .await
        .unwrap();

    store.delete(doomed).await.unwrap();
    // Deleting an absent id stays a no-op.
    store.delete(doomed).await.unwrap();

    let notes = store.get_notes().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, keep);
}

#[tokio::test]
async fn delete_all_empties_the_collection() {
    let store = store();

    store
        .upsert_all(vec![
            Note::new("a".to_string(), None, None),
            Note::new("b".to_string(), None, None),
        ])
        .await
        .unwrap();
    assert_eq!(store.get_notes().await.unwrap().len(), 2);

    store.delete_all().await.unwrap();
    assert!(store.get_notes().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_by_title_returns_first_pattern_match() {
    let store = store();

    store
        .upsert_all(vec![
            Note::new("groceries".to_string(), None, None),
            Note::new("grocery run".to_string(), None, None),
            Note::new("workout".to_string(), None, None),
        ])
        .await
        .unwrap();

    let hit = store
        .find_by_title("grocer%".to_string())
        .await
        .unwrap()
        .expect("pattern should match");
    assert_eq!(hit.title.as_deref(), Some("groceries"));

    let miss = store.find_by_title("diary%".to_string()).await.unwrap();
    assert!(miss.is_none());
}

#[tokio::test]
async fn search_notes_matches_title_and_content_substrings() {
    let store = store();

    store
        .upsert_all(vec![
            Note::new("meeting notes".to_string(), "agenda".to_string(), None),
            Note::new("journal".to_string(), "met the team".to_string(), None),
            Note::new("todo".to_string(), "buy milk".to_string(), None),
        ])
        .await
        .unwrap();

    let hits = store.search_notes("met".to_string()).await.unwrap();
    assert_eq!(hits.len(), 2);

    let none = store.search_notes("absent".to_string()).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn bulk_upsert_overwrites_overlapping_ids() {
    let store = store();

    store
        .upsert(Note::with_id(1, "old".to_string(), "stale".to_string(), None))
        .await
        .unwrap();

    store
        .upsert_all(vec![
            Note::with_id(1, "new".to_string(), "fresh".to_string(), None),
            Note::with_id(2, "other".to_string(), None, None),
        ])
        .await
        .unwrap();

    let notes = store.get_notes().await.unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title.as_deref(), Some("new"));
    assert_eq!(notes[0].content.as_deref(), Some("fresh"));
}
