//! Append-only log of check outcomes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use pricewatch_core::ProductRecord;

use crate::json_file::{ensure_array_file, read_array, write_array};
use crate::StoreError;

/// One check outcome. Optional fields are omitted from the file when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ProductRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl LogEntry {
    #[must_use]
    pub fn success(record: ProductRecord, ip: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            url: record.url.clone(),
            success: true,
            data: Some(record),
            error: None,
            ip,
        }
    }

    #[must_use]
    pub fn failure(url: impl Into<String>, error: impl Into<String>, ip: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            url: url.into(),
            success: false,
            data: None,
            error: Some(error.into()),
            ip,
        }
    }
}

/// Whether a success observed at `now` should be logged, given the last
/// logged success.
///
/// A success is due when none has been logged yet or the last one is at
/// least `window` old.
#[must_use]
pub fn success_is_due(last: Option<&LogEntry>, now: DateTime<Utc>, window: Duration) -> bool {
    last.is_none_or(|entry| now - entry.timestamp >= window)
}

/// JSON-array log file, oldest entry first.
#[derive(Debug)]
pub struct LogStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LogStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `entry` to the end of the log, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read, parsed or written.
    pub async fn append(&self, entry: LogEntry) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.append_locked(entry).await
    }

    /// Every entry, oldest first. A missing file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or parsed.
    pub async fn read_all(&self) -> Result<Vec<LogEntry>, StoreError> {
        let _guard = self.lock.lock().await;
        read_array(&self.path).await
    }

    /// The most recent successful entry, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or parsed.
    pub async fn last_successful(&self) -> Result<Option<LogEntry>, StoreError> {
        let entries = self.read_all().await?;
        Ok(entries.into_iter().rev().find(|e| e.success))
    }

    /// Appends a success entry only if [`success_is_due`] at the entry's
    /// timestamp. Returns whether the entry was written.
    ///
    /// The check and the write happen under one lock, so concurrent callers
    /// in this process cannot both log inside the same window.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read, parsed or written.
    pub async fn append_success_if_due(
        &self,
        entry: LogEntry,
        window: Duration,
    ) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;

        let entries: Vec<LogEntry> = read_array(&self.path).await?;
        let last = entries.iter().rev().find(|e| e.success);
        if !success_is_due(last, entry.timestamp, window) {
            tracing::info!(
                url = %entry.url,
                "skipping log: last successful entry is inside the suppression window"
            );
            return Ok(false);
        }

        self.append_locked(entry).await?;
        Ok(true)
    }

    async fn append_locked(&self, entry: LogEntry) -> Result<(), StoreError> {
        ensure_array_file(&self.path).await?;
        let mut entries: Vec<LogEntry> = read_array(&self.path).await?;
        entries.push(entry);
        write_array(&self.path, &entries).await
    }
}

#[cfg(test)]
#[path = "log_test.rs"]
mod tests;
