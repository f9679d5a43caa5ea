// src/storage.rs

//! Last-seen record persistence.
//!
//! One file holds exactly one serialized [`ReleaseRecord`]: the most
//! recently observed release, used as the baseline for change detection.
//! A missing file is the normal initial state, not an error.

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::ReleaseRecord;

/// File-backed store for the single last-seen release.
#[derive(Debug, Clone)]
pub struct LastSeenStore {
    path: PathBuf,
}

impl LastSeenStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted record, or `None` if no prior state exists.
    pub async fn load(&self) -> Result<Option<ReleaseRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Overwrite the stored record (write to temp, then rename).
    pub async fn save(&self, record: &ReleaseRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(record)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
