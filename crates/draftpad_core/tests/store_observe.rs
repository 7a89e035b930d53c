use draftpad_core::db::open_db_in_memory;
use draftpad_core::{Note, NoteStore, StoreError, StoreResult};
use futures_util::stream::{Stream, StreamExt};
use std::time::Duration;

async fn next_item<T>(stream: &mut (impl Stream<Item = StoreResult<T>> + Unpin)) -> StoreResult<T> {
    tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("stream should emit before timeout")
        .expect("store stream should stay open")
}

#[tokio::test]
async fn observe_notes_emits_current_collection_immediately() {
    let store = NoteStore::new(open_db_in_memory().unwrap());
    store
        .upsert(Note::new("seed".to_string(), None, None))
        .await
        .unwrap();

    let mut stream = Box::pin(store.observe_notes());
    let initial = next_item(&mut stream).await.unwrap();
    assert_eq!(initial.len(), 1);
    assert_eq!(initial[0].title.as_deref(), Some("seed"));
}

#[tokio::test]
async fn observe_notes_re_emits_after_each_write() {
    let store = NoteStore::new(open_db_in_memory().unwrap());
    let mut stream = Box::pin(store.observe_notes());

    let initial = next_item(&mut stream).await.unwrap();
    assert!(initial.is_empty());

    let id = store
        .upsert(Note::new("live".to_string(), "body".to_string(), None))
        .await
        .unwrap();
    let after_insert = next_item(&mut stream).await.unwrap();
    assert_eq!(after_insert.len(), 1);
    assert_eq!(after_insert[0].id, id);

    store.delete(id).await.unwrap();
    let after_delete = next_item(&mut stream).await.unwrap();
    assert!(after_delete.is_empty());
}

#[tokio::test]
async fn observe_note_tracks_replacements_by_id() {
    let store = NoteStore::new(open_db_in_memory().unwrap());
    let id = store
        .upsert(Note::new("v1".to_string(), None, None))
        .await
        .unwrap();

    let mut stream = Box::pin(store.observe_note(id));
    let initial = next_item(&mut stream).await.unwrap();
    assert_eq!(initial.title.as_deref(), Some("v1"));

    store
        .upsert(Note::with_id(id, "v2".to_string(), None, None))
        .await
        .unwrap();
    let updated = next_item(&mut stream).await.unwrap();
    assert_eq!(updated.title.as_deref(), Some("v2"));
}

#[tokio::test]
async fn observe_note_surfaces_missing_id_as_error_item() {
    let store = NoteStore::new(open_db_in_memory().unwrap());

    let mut stream = Box::pin(store.observe_note(9));
    let missing = next_item(&mut stream).await;
    match missing {
        Err(StoreError::NotFound(id)) => assert_eq!(id, 9),
        other => panic!("unexpected item: {other:?}"),
    }

    store
        .upsert(Note::with_id(9, "late".to_string(), None, None))
        .await
        .unwrap();
    let appeared = next_item(&mut stream).await.unwrap();
    assert_eq!(appeared.title.as_deref(), Some("late"));
}

#[tokio::test]
async fn dropped_stream_does_not_block_later_writes() {
    let store = NoteStore::new(open_db_in_memory().unwrap());

    {
        let mut stream = Box::pin(store.observe_notes());
        let _ = next_item(&mut stream).await.unwrap();
    }

    store
        .upsert(Note::new("after drop".to_string(), None, None))
        .await
        .unwrap();
    assert_eq!(store.get_notes().await.unwrap().len(), 1);
}
