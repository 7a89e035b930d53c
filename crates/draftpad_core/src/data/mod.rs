//! Data adapters and the synchronizing repository.
//!
//! Reads flow one way (store -> local adapter -> repository -> consumer, as
//! live streams); refresh round-trips through the remote adapter and writes
//! back into the local one before the streams re-emit.

pub mod local;
pub mod remote;
pub mod repository;
pub mod result_state;
