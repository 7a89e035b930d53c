//! Local data adapter over the persistent store.
//!
//! # Responsibility
//! - Adapt every store operation into the `ResultState` contract.
//! - Apply the note normalization policy once, on the write boundary.
//!
//! # Invariants
//! - Stream and one-shot reads never raise: store faults become
//!   `ResultState::Error` items instead of escaping to the caller.
//! - Writes propagate `StoreError` untouched; converting them is the
//!   repository's responsibility where a `ResultState` is expected.

use crate::data::result_state::ResultState;
use crate::model::note::Note;
use crate::store::note_store::{NoteStore, StoreResult};
use futures_util::stream::{Stream, StreamExt};

/// `ResultState`-shaped adapter over [`NoteStore`].
#[derive(Clone)]
pub struct LocalNoteDataSource {
    store: NoteStore,
}

impl LocalNoteDataSource {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }

    /// Live collection stream; one `ResultState` item per store change.
    pub fn notes_stream(&self) -> impl Stream<Item = ResultState<Vec<Note>>> + Send + 'static {
        self.store.observe_notes().map(ResultState::from)
    }

    /// One-shot collection read; store faults resolve to `Error`.
    pub async fn get_notes(&self) -> ResultState<Vec<Note>> {
        self.store.get_notes().await.into()
    }

    /// Live single-note stream; a missing id yields `Error` items.
    pub fn note_stream(&self, note_id: i64) -> impl Stream<Item = ResultState<Note>> + Send + 'static {
        self.store.observe_note(note_id).map(ResultState::from)
    }

    /// One-shot point read; store faults resolve to `Error`.
    pub async fn get_note(&self, note_id: i64) -> ResultState<Note> {
        self.store.get_note(note_id).await.into()
    }

    /// One-shot substring search over title and content.
    pub async fn search_notes(&self, query: &str) -> ResultState<Vec<Note>> {
        self.store.search_notes(query.to_string()).await.into()
    }

    /// Upserts one normalized note and returns its store-assigned id.
    pub async fn save_note(&self, note: Note) -> StoreResult<i64> {
        self.store.upsert(note.normalized()).await
    }

    /// Bulk-upserts normalized notes in one transaction.
    pub async fn save_all_notes(&self, notes: Vec<Note>) -> StoreResult<()> {
        let normalized = notes.into_iter().map(Note::normalized).collect();
        self.store.upsert_all(normalized).await
    }

    /// Deletes one note by id.
    pub async fn delete_note(&self, note_id: i64) -> StoreResult<()> {
        self.store.delete(note_id).await
    }

    /// Deletes the whole local collection.
    pub async fn delete_all_notes(&self) -> StoreResult<()> {
        self.store.delete_all().await
    }
}
