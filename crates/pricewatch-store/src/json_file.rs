use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::StoreError;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Creates parent directories and an empty `[]` array if `path` is missing.
pub(crate) async fn ensure_array_file(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(io_error(path))?;
    }

    if tokio::fs::try_exists(path).await.map_err(io_error(path))? {
        return Ok(());
    }

    tracing::debug!(path = %path.display(), "creating empty store file");
    tokio::fs::write(path, "[]").await.map_err(io_error(path))
}

/// Reads a JSON array. A missing or blank file reads as empty.
pub(crate) async fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(path)(e)),
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the file contents with `items` as a pretty-printed array.
pub(crate) async fn write_array<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(items).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tokio::fs::write(path, json).await.map_err(io_error(path))
}
