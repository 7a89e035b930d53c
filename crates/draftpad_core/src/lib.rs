//! Core data layer for Draftpad.
//! This crate is the single source of truth for note persistence and the
//! local/remote synchronization policy consumed by presentation hosts.

pub mod data;
pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use data::local::LocalNoteDataSource;
pub use data::remote::{RemoteNoteDataSource, UnconfiguredRemote};
pub use data::repository::{SyncError, SyncNoteRepository};
pub use data::result_state::ResultState;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NEW_NOTE_ID};
pub use store::note_store::{NoteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
