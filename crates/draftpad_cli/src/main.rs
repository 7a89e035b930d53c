//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `draftpad_core` wiring end to
//!   end, independently of any UI host.
//! - Keep output deterministic for quick local sanity checks.

use draftpad_core::db::open_db_in_memory;
use draftpad_core::{
    LocalNoteDataSource, Note, NoteStore, ResultState, SyncNoteRepository, UnconfiguredRemote,
};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    println!("draftpad_core version={}", draftpad_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("db open failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let local = LocalNoteDataSource::new(NoteStore::new(conn));
    let repository = SyncNoteRepository::new(local, Arc::new(UnconfiguredRemote));

    let note = Note::new(
        "smoke".to_string(),
        "probe note body".to_string(),
        "2026-01-01".to_string(),
    );
    let note_id = match repository.save_note(note).await {
        Ok(id) => id,
        Err(err) => {
            eprintln!("save failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("saved note_id={note_id}");

    match repository.get_notes(false).await {
        ResultState::Success(notes) => {
            println!("local notes={}", notes.len());
            ExitCode::SUCCESS
        }
        ResultState::Error(message) => {
            eprintln!("read failed: {}", message.unwrap_or_default());
            ExitCode::FAILURE
        }
        ResultState::Loading => {
            eprintln!("unexpected loading state from one-shot read");
            ExitCode::FAILURE
        }
    }
}
