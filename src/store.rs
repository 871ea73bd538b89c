//! Durable JSONL store. One record per line, append-only.
//!
//! The file is the sole durable state of the service; everything in memory is
//! rebuilt from it on each report call.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::event::TrackEvent;

/// Append-only JSONL file holding every tracking event.
///
/// Cloning is cheap; clones share the append guard, so concurrent handlers
/// never interleave partial lines. Reads take no lock: an append is a single
/// buffered write under the guard, so a racing read sees the file either
/// without the in-flight line or with it whole.
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
    append_guard: Arc<Mutex<()>>,
}

impl EventStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), append_guard: Arc::new(Mutex::new(())) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log file empty if it does not exist yet.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map(drop)
            .map_err(StoreError::Append)
    }

    /// Serialize `event` to one line and append it, flushing before return.
    ///
    /// Open-on-demand `O_APPEND` write; no read-modify-write anywhere.
    pub async fn append(&self, event: &TrackEvent) -> Result<(), StoreError> {
        let mut line =
            serde_json::to_string(event).map_err(|e| StoreError::Append(e.into()))?;
        line.push('\n');

        let _guard = self.append_guard.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(StoreError::Append)?;
        file.write_all(line.as_bytes()).await.map_err(StoreError::Append)?;
        file.flush().await.map_err(StoreError::Append)?;
        Ok(())
    }

    /// Read every record in file order.
    ///
    /// Blank lines are skipped. Lines that fail to decode are skipped and
    /// logged at debug level. The log is append-only and hand-editable, so a
    /// bad line must never take both reports down with it.
    pub async fn load(&self) -> Result<Vec<TrackEvent>, StoreError> {
        let text =
            tokio::fs::read_to_string(&self.path).await.map_err(StoreError::Read)?;
        let mut events = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<TrackEvent>(line) {
                Ok(event) => events.push(event),
                Err(err) => debug!(%err, "skipping undecodable log line"),
            }
        }
        Ok(events)
    }
}
