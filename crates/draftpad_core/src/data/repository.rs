//! Synchronizing note repository.
//!
//! # Responsibility
//! - Compose the local and remote adapters behind one read/write API.
//! - Own the force-refresh merge policy: remote wins, local is replaced
//!   wholesale, never merged.
//!
//! # Invariants
//! - Live streams are served from local only; remote is never observed.
//! - Resynchronization deletes local state before inserting the remote
//!   collection, so a crash between the two steps leaves local empty, not
//!   stale.
//! - Concurrent resynchronizations are serialized by a single-flight
//!   guard; delete/insert phases of two refreshes cannot interleave.
//! - Public reads returning `ResultState` never raise; `refresh_notes` and
//!   the write pass-throughs are the only fault-propagating operations.

use crate::data::local::LocalNoteDataSource;
use crate::data::remote::RemoteNoteDataSource;
use crate::data::result_state::ResultState;
use crate::model::note::Note;
use crate::store::note_store::{StoreError, StoreResult};
use futures_util::stream::Stream;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Synchronization failure raised by refresh paths.
#[derive(Debug)]
pub enum SyncError {
    /// Remote fetch failed; carries the remote's own message.
    Remote(String),
    /// Local write-back failed during the replace phase.
    Store(StoreError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The raw underlying message is the user-visible error text, so
        // converted `ResultState::Error` values match the source fault.
        match self {
            Self::Remote(message) => write!(f, "{message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Remote(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for SyncError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Single entry point for presentation-layer note access.
///
/// Remote is a read-seed source only: saves and deletes go to local and
/// are never propagated upstream.
pub struct SyncNoteRepository {
    local: LocalNoteDataSource,
    remote: Arc<dyn RemoteNoteDataSource>,
    resync_guard: Mutex<()>,
}

impl SyncNoteRepository {
    pub fn new(local: LocalNoteDataSource, remote: Arc<dyn RemoteNoteDataSource>) -> Self {
        Self {
            local,
            remote,
            resync_guard: Mutex::new(()),
        }
    }

    /// Live collection stream, served from local.
    pub fn notes_stream(&self) -> impl Stream<Item = ResultState<Vec<Note>>> + Send + 'static {
        self.local.notes_stream()
    }

    /// One-shot collection read.
    ///
    /// With `force_update` the full resynchronization runs first; a resync
    /// failure short-circuits to `Error` without touching the local read.
    pub async fn get_notes(&self, force_update: bool) -> ResultState<Vec<Note>> {
        if force_update {
            if let Err(err) = self.resync_from_remote().await {
                return ResultState::Error(Some(err.to_string()));
            }
        }
        self.local.get_notes().await
    }

    /// Live single-note stream, served from local.
    pub fn note_stream(&self, note_id: i64) -> impl Stream<Item = ResultState<Note>> + Send + 'static {
        self.local.note_stream(note_id)
    }

    /// One-shot point read.
    ///
    /// With `force_update` the note is fetched from remote first and, on
    /// success, written back into local before the read; a remote failure
    /// short-circuits to `Error` and leaves local untouched.
    pub async fn get_note(&self, note_id: i64, force_update: bool) -> ResultState<Note> {
        if force_update {
            if let Err(err) = self.refresh_note_from_remote(note_id).await {
                return ResultState::Error(Some(err.to_string()));
            }
        }
        self.local.get_note(note_id).await
    }

    /// Substring search, served from local.
    pub async fn search_notes(&self, query: &str) -> ResultState<Vec<Note>> {
        self.local.search_notes(query).await
    }

    /// Saves one note locally and returns its store-assigned id.
    pub async fn save_note(&self, note: Note) -> StoreResult<i64> {
        self.local.save_note(note).await
    }

    /// Deletes one note locally.
    pub async fn delete_note(&self, note_id: i64) -> StoreResult<()> {
        self.local.delete_note(note_id).await
    }

    /// Deletes the whole local collection.
    pub async fn delete_all_notes(&self) -> StoreResult<()> {
        self.local.delete_all_notes().await
    }

    /// Unconditionally resynchronizes local against remote.
    ///
    /// # Errors
    /// Propagates the resynchronization fault to the caller; this is the
    /// one public operation that intentionally lets it escape.
    pub async fn refresh_notes(&self) -> Result<(), SyncError> {
        self.resync_from_remote().await
    }

    /// Full-collection resynchronization: fetch remote, then destructively
    /// replace local (delete-all before bulk-insert). One round trip, no
    /// retry, no partial success.
    async fn resync_from_remote(&self) -> Result<(), SyncError> {
        let _flight = self.resync_guard.lock().await;
        let started_at = Instant::now();
        info!("event=resync module=repository status=start scope=collection");

        match self.remote.fetch_notes().await {
            ResultState::Success(notes) => {
                let count = notes.len();
                self.local.delete_all_notes().await?;
                self.local.save_all_notes(notes).await?;
                info!(
                    "event=resync module=repository status=ok scope=collection count={count} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            other => {
                let err = SyncError::Remote(remote_failure_message(&other));
                error!(
                    "event=resync module=repository status=error scope=collection duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    /// Targeted refresh: fetch one note from remote and overwrite the
    /// local row by id. A remote failure aborts before any local write.
    async fn refresh_note_from_remote(&self, note_id: i64) -> Result<(), SyncError> {
        match self.remote.fetch_note(note_id).await {
            ResultState::Success(note) => {
                self.local.save_note(note).await?;
                info!("event=resync module=repository status=ok scope=note note_id={note_id}");
                Ok(())
            }
            other => {
                let err = SyncError::Remote(remote_failure_message(&other));
                error!(
                    "event=resync module=repository status=error scope=note note_id={note_id} error={err}"
                );
                Err(err)
            }
        }
    }
}

fn remote_failure_message<T>(state: &ResultState<T>) -> String {
    match state {
        ResultState::Error(Some(message)) => message.clone(),
        ResultState::Error(None) => "remote fetch failed".to_string(),
        // One-shot remote calls must not resolve to Loading; treat a
        // contract violation as a failure rather than replacing local.
        ResultState::Success(_) | ResultState::Loading => {
            "remote returned no terminal result".to_string()
        }
    }
}
