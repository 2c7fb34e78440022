//! Whole-document JSON persistence on the local filesystem
//!
//! A `JsonDocument` owns one file path and reads or replaces the entire
//! document on every call. There is no caching and no locking here; callers
//! that need read-modify-write isolation must serialize it themselves.

use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// Errors raised by document storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt document at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A single JSON document stored at a fixed path
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and decode the document.
    ///
    /// Returns `Ok(None)` when the file does not exist. Every other failure,
    /// including undecodable content, is an error.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Create the document with `initial` contents only if no file exists yet.
    ///
    /// The contents are written to a private temp file first and then hard-linked
    /// into place. Linking fails rather than overwrites when the target exists, so
    /// readers never see an empty or partial document and a document written by
    /// someone else is left alone. Returns `true` if this call created it.
    pub async fn create_if_absent<T: Serialize>(&self, initial: &T) -> Result<bool, StoreError> {
        self.ensure_parent_dir().await?;
        let json = serde_json::to_vec_pretty(initial).map_err(StoreError::Serialize)?;

        let tmp_path = self.unique_tmp_path();
        if let Err(e) = fs::write(&tmp_path, &json).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::io(&tmp_path, e));
        }

        let linked = fs::hard_link(&tmp_path, &self.path).await;
        let _ = fs::remove_file(&tmp_path).await;

        match linked {
            Ok(()) => {
                info!(path = %self.path.display(), "Initialized empty document");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Replace the whole document with `value`.
    ///
    /// Writes to a sibling temp file and renames it over the target, so readers
    /// see either the old or the new document, never a partial one.
    pub async fn save<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        self.ensure_parent_dir().await?;
        let json = serde_json::to_vec_pretty(value).map_err(StoreError::Serialize)?;

        let tmp_path = self.tmp_path();
        if let Err(e) = fs::write(&tmp_path, &json).await {
            return Err(StoreError::io(&tmp_path, e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::io(&self.path, e));
        }

        debug!(path = %self.path.display(), bytes = json.len(), "Document saved");
        Ok(())
    }

    async fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e)),
            _ => Ok(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Temp file no other writer will pick
    fn unique_tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.init", Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }
}
