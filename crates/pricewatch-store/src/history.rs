//! Saved reports, newest first, keyed by timestamp.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use pricewatch_core::Report;

use crate::json_file::{ensure_array_file, read_array, write_array};
use crate::StoreError;

#[derive(Debug)]
pub struct ReportHistory {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ReportHistory {
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

    /// Saves `report` at the front of the history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read, parsed or written.
    pub async fn append(&self, report: Report) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        ensure_array_file(&self.path).await?;
        let mut reports: Vec<Report> = read_array(&self.path).await?;
        reports.insert(0, report);
        write_array(&self.path, &reports).await
    }

    /// Deletes every report stamped `timestamp`. Returns whether anything was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read, parsed or written.
    pub async fn remove(&self, timestamp: DateTime<Utc>) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut reports: Vec<Report> = read_array(&self.path).await?;
        let before = reports.len();
        reports.retain(|r| r.timestamp != timestamp);
        if reports.len() == before {
            return Ok(false);
        }
        write_array(&self.path, &reports).await?;
        Ok(true)
    }

    /// Every saved report, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or parsed.
    pub async fn list_all(&self) -> Result<Vec<Report>, StoreError> {
        let _guard = self.lock.lock().await;
        read_array(&self.path).await
    }
}
