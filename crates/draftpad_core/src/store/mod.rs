//! Durable note storage and its change feed.

pub mod note_store;
