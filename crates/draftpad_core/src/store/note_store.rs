//! Persistent note store over SQLite.
//!
//! # Responsibility
//! - Provide point, pattern and full-collection queries over the `note`
//!   table, plus upsert/delete write paths.
//! - Publish a change feed so live observers re-read after every committed
//!   write.
//!
//! # Invariants
//! - All write paths are keyed upserts: re-inserting an existing `id`
//!   replaces the row, never duplicates it.
//! - Blocking SQLite work always runs on the blocking I/O context, never on
//!   the async executor threads.
//! - Every successful write bumps the change feed exactly once.

use crate::db::DbError;
use crate::model::note::{Note, NEW_NOTE_ID};
use futures_util::stream::{self, Stream};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

const NOTE_SELECT_SQL: &str = "SELECT id, title, content, dateStamp FROM note";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for note store operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    NotFound(i64),
    Runtime(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Runtime(message) => write!(f, "store runtime failure: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Runtime(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

type SharedConnection = Arc<Mutex<Connection>>;

/// SQLite-backed note store with a per-table change feed.
///
/// Cloning is cheap: clones share the same connection and feed, so any
/// clone's write wakes every observer.
#[derive(Clone)]
pub struct NoteStore {
    conn: SharedConnection,
    changes: watch::Sender<u64>,
}

impl NoteStore {
    /// Wraps a migrated connection (see [`crate::db::open_db`]).
    pub fn new(conn: Connection) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            conn: Arc::new(Mutex::new(conn)),
            changes,
        }
    }

    /// Fetches the full collection in stable `id` order.
    pub async fn get_notes(&self) -> StoreResult<Vec<Note>> {
        run_on(Arc::clone(&self.conn), fetch_all_notes).await
    }

    /// Fetches one note by id; a missing id is [`StoreError::NotFound`].
    pub async fn get_note(&self, note_id: i64) -> StoreResult<Note> {
        run_on(Arc::clone(&self.conn), move |conn| fetch_note(conn, note_id)).await
    }

    /// Fetches the first note whose title matches a SQL `LIKE` pattern.
    pub async fn find_by_title(&self, pattern: String) -> StoreResult<Option<Note>> {
        run_on(Arc::clone(&self.conn), move |conn| {
            let note = conn
                .prepare(&format!("{NOTE_SELECT_SQL} WHERE title LIKE ?1 LIMIT 1"))?
                .query_row(params![pattern], note_from_row)
                .optional()?;
            Ok(note)
        })
        .await
    }

    /// Fetches every note whose title or content contains `query`.
    pub async fn search_notes(&self, query: String) -> StoreResult<Vec<Note>> {
        run_on(Arc::clone(&self.conn), move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{NOTE_SELECT_SQL}
                 WHERE title LIKE '%' || ?1 || '%'
                    OR content LIKE '%' || ?1 || '%'
                 ORDER BY id ASC"
            ))?;
            let notes = stmt
                .query_map(params![query], note_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(notes)
        })
        .await
    }

    /// Inserts or replaces one note and returns its id.
    ///
    /// A note with `id == NEW_NOTE_ID` gets a store-assigned id; any other
    /// id overwrites the existing row with that id.
    pub async fn upsert(&self, note: Note) -> StoreResult<i64> {
        let id = run_on(Arc::clone(&self.conn), move |conn| {
            upsert_note(conn, &note)
        })
        .await?;
        self.notify_changed();
        Ok(id)
    }

    /// Inserts or replaces many notes in one transaction.
    pub async fn upsert_all(&self, notes: Vec<Note>) -> StoreResult<()> {
        run_on(Arc::clone(&self.conn), move |conn| {
            let tx = conn.transaction()?;
            for note in &notes {
                upsert_note(&tx, note)?;
            }
            tx.commit()?;
            Ok(())
        })
        .await?;
        self.notify_changed();
        Ok(())
    }

    /// Deletes one note by id. Deleting a missing id is a no-op.
    pub async fn delete(&self, note_id: i64) -> StoreResult<()> {
        run_on(Arc::clone(&self.conn), move |conn| {
            conn.execute("DELETE FROM note WHERE id = ?1", params![note_id])?;
            Ok(())
        })
        .await?;
        self.notify_changed();
        Ok(())
    }

    /// Deletes the whole collection.
    pub async fn delete_all(&self) -> StoreResult<()> {
        run_on(Arc::clone(&self.conn), move |conn| {
            conn.execute("DELETE FROM note", [])?;
            Ok(())
        })
        .await?;
        self.notify_changed();
        Ok(())
    }

    /// Live stream of the full collection.
    ///
    /// Emits the current collection immediately, then re-emits after every
    /// committed write. Dropping the stream unsubscribes from the feed.
    pub fn observe_notes(&self) -> impl Stream<Item = StoreResult<Vec<Note>>> + Send + 'static {
        self.observe_with(fetch_all_notes)
    }

    /// Live stream of one note by id.
    ///
    /// A missing or deleted id surfaces as [`StoreError::NotFound`] items;
    /// the stream itself stays alive until dropped.
    pub fn observe_note(&self, note_id: i64) -> impl Stream<Item = StoreResult<Note>> + Send + 'static {
        self.observe_with(move |conn| fetch_note(conn, note_id))
    }

    fn observe_with<T, F>(&self, read: F) -> impl Stream<Item = StoreResult<T>> + Send + 'static
    where
        T: Send + 'static,
        F: Fn(&mut Connection) -> StoreResult<T> + Clone + Send + Sync + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let rx = self.changes.subscribe();
        stream::unfold(
            (rx, conn, false),
            move |(mut rx, conn, primed)| {
                let read = read.clone();
                async move {
                    if primed && rx.changed().await.is_err() {
                        return None;
                    }
                    let item = run_on(Arc::clone(&conn), move |c| read(c)).await;
                    Some((item, (rx, conn, true)))
                }
            },
        )
    }

    fn notify_changed(&self) {
        self.changes.send_modify(|generation| *generation += 1);
    }
}

async fn run_on<T, F>(conn: SharedConnection, op: F) -> StoreResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn
            .lock()
            .map_err(|_| StoreError::Runtime("store connection lock poisoned".to_string()))?;
        op(&mut guard)
    })
    .await
    .map_err(|err| StoreError::Runtime(format!("store task aborted: {err}")))?
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        date_stamp: row.get("dateStamp")?,
    })
}

fn fetch_all_notes(conn: &mut Connection) -> StoreResult<Vec<Note>> {
    let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC"))?;
    let notes = stmt
        .query_map([], note_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notes)
}

fn fetch_note(conn: &mut Connection, note_id: i64) -> StoreResult<Note> {
    conn.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1"))?
        .query_row(params![note_id], note_from_row)
        .optional()?
        .ok_or(StoreError::NotFound(note_id))
}

fn upsert_note(conn: &Connection, note: &Note) -> StoreResult<i64> {
    if note.id == NEW_NOTE_ID {
        conn.execute(
            "INSERT INTO note (title, content, dateStamp) VALUES (?1, ?2, ?3)",
            params![note.title, note.content, note.date_stamp],
        )?;
        Ok(conn.last_insert_rowid())
    } else {
        conn.execute(
            "INSERT OR REPLACE INTO note (id, title, content, dateStamp)
             VALUES (?1, ?2, ?3, ?4)",
            params![note.id, note.title, note.content, note.date_stamp],
        )?;
        Ok(note.id)
    }
}
