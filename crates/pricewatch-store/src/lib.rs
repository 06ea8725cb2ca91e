//! File-backed stores for check outcomes and saved reports.
//!
//! Both stores keep a single pretty-printed JSON array on disk and rewrite it
//! on every mutation. A per-store async mutex serializes read-modify-write
//! cycles within one process; nothing coordinates separate processes.

pub mod history;
mod json_file;
pub mod log;

use std::path::PathBuf;

use thiserror::Error;

pub use history::ReportHistory;
pub use log::{success_is_due, LogEntry, LogStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
