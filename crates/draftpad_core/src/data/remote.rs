//! Remote data adapter contract.
//!
//! The networked source behind this trait is not part of the core; the
//! trait is the integration seam a future sync backend plugs into. All
//! operations are one-shot request/response — remote never streams.

use crate::data::result_state::ResultState;
use crate::model::note::Note;
use async_trait::async_trait;

/// One-shot remote source of note data.
///
/// Implementations resolve every call to `Success` or `Error`; `Loading`
/// is never a valid one-shot outcome.
#[async_trait]
pub trait RemoteNoteDataSource: Send + Sync {
    /// Fetches the full remote collection.
    async fn fetch_notes(&self) -> ResultState<Vec<Note>>;

    /// Fetches one note by id.
    async fn fetch_note(&self, note_id: i64) -> ResultState<Note>;

    /// Searches remote notes. Declared by the contract but unused by the
    /// core sync policy, which searches locally.
    async fn search_notes(&self, query: &str) -> ResultState<Vec<Note>>;
}

const UNCONFIGURED_MESSAGE: &str = "remote source not configured";

/// Placeholder remote used until a real backend is wired in.
///
/// Every call resolves to `Error` so force-update paths fail cleanly
/// instead of panicking.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredRemote;

#[async_trait]
impl RemoteNoteDataSource for UnconfiguredRemote {
    async fn fetch_notes(&self) -> ResultState<Vec<Note>> {
        ResultState::Error(Some(UNCONFIGURED_MESSAGE.to_string()))
    }

    async fn fetch_note(&self, _note_id: i64) -> ResultState<Note> {
        ResultState::Error(Some(UNCONFIGURED_MESSAGE.to_string()))
    }

    async fn search_notes(&self, _query: &str) -> ResultState<Vec<Note>> {
        ResultState::Error(Some(UNCONFIGURED_MESSAGE.to_string()))
    }
}
