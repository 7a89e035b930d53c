//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the system.
//! - Provide the one normalization policy for optional text fields.
//!
//! # Invariants
//! - `id` uniquely identifies a note in the store; `id == NEW_NOTE_ID` marks
//!   a note that has not been persisted yet.
//! - Normalization happens exactly once, at the local adapter's write
//!   boundary, never scattered across call sites.

use serde::{Deserialize, Serialize};

/// Sentinel id for a note the store has not assigned an id to yet.
pub const NEW_NOTE_ID: i64 = 0;

/// The sole persisted entity: one note row.
///
/// `date_stamp` is an application-formatted date string, not a native
/// timestamp; it is serialized as `dateStamp` to match the external schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "dateStamp")]
    pub date_stamp: Option<String>,
}

impl Note {
    /// Creates an unpersisted note; the store assigns an id on insert.
    pub fn new(
        title: impl Into<Option<String>>,
        content: impl Into<Option<String>>,
        date_stamp: impl Into<Option<String>>,
    ) -> Self {
        Self {
            id: NEW_NOTE_ID,
            title: title.into(),
            content: content.into(),
            date_stamp: date_stamp.into(),
        }
    }

    /// Creates a note with a known id, as read back from a store or remote.
    pub fn with_id(
        id: i64,
        title: impl Into<Option<String>>,
        content: impl Into<Option<String>>,
        date_stamp: impl Into<Option<String>>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            date_stamp: date_stamp.into(),
        }
    }

    /// Returns whether the store still has to assign an id to this note.
    pub fn is_new(&self) -> bool {
        self.id == NEW_NOTE_ID
    }

    /// Returns this note with blank optional fields collapsed to `None`.
    ///
    /// # Invariants
    /// - Whitespace-only and empty strings become `None`.
    /// - Surrounding whitespace on non-blank values is preserved as-is.
    pub fn normalized(mut self) -> Self {
        self.title = normalize_field(self.title);
        self.content = normalize_field(self.content);
        self.date_stamp = normalize_field(self.date_stamp);
        self
    }
}

fn normalize_field(value: Option<String>) -> Option<String> {
    match value {
        Some(text) if text.trim().is_empty() => None,
        other => other,
    }
}
