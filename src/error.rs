//! Error types for the durable event store.

use std::io;
use thiserror::Error;

/// Failures touching the JSONL log file.
///
/// Per-line decode failures are not errors; the store skips those (see
/// [`crate::store::EventStore::load`]). These variants cover the file itself
/// being unwritable or unreadable.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Appending a record to the log failed.
    #[error("failed to append event record: {0}")]
    Append(#[source] io::Error),
    /// Reading the log failed.
    #[error("failed to read event log: {0}")]
    Read(#[source] io::Error),
}
