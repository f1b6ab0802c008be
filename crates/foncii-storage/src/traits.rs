//! Object storage seam
//!
//! Keys passed to a [`Storage`] are object keys relative to the bucket (see
//! [`crate::StoragePath::object_key`]). Every key is written whole: there are
//! no appends and no partial reads.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write object {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("Failed to read object {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to remove object {key}: {reason}")]
    Remove { key: String, reason: String },

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Storage misconfigured: {0}")]
    Misconfigured(String),
}

impl StorageError {
    pub fn write(key: &str, reason: impl ToString) -> Self {
        StorageError::Write {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn read(key: &str, reason: impl ToString) -> Self {
        StorageError::Read {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn remove(key: &str, reason: impl ToString) -> Self {
        StorageError::Remove {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A bucket of media objects.
///
/// The ingestion gateway only puts and deletes. `get` and `exists` back the
/// CLI `stat` and `fetch` commands.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` at `key`, replacing any existing object. Returns the
    /// backend's direct URL for the object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<String>;

    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Remove the object at `key`. Removing a missing object succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    async fn exists(&self, key: &str) -> StorageResult<bool>;

    fn backend_type(&self) -> StorageBackend;
}
