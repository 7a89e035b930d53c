//! Domain models for Draftpad core.

pub mod note;
