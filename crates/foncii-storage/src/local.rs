use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Filesystem storage for development and single-host deployments.
///
/// An object key maps to `root/<key>`. Writes go to a hidden sibling file and
/// are renamed into place, so an overwrite of the same post never exposes a
/// partially written object. Content types are not persisted.
#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_url: String,
}

impl LocalStorage {
    /// Open (and create if needed) a storage root.
    ///
    /// `public_url` is the prefix the files are served under, e.g.
    /// `http://localhost:4000/media`.
    pub async fn new(root: impl Into<PathBuf>, public_url: String) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::Misconfigured(format!(
                "Cannot create storage root {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            public_url: public_url.trim_end_matches('/').to_string(),
            root,
        })
    }

    /// Map an object key to a file under the root.
    ///
    /// Every `/`-separated segment must be a plain name, so the result can
    /// never leave the root.
    fn resolve(&self, key: &str) -> StorageResult<PathBuf> {
        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(StorageError::InvalidKey(format!(
                    "'{}' is not a valid object key",
                    key
                )));
            }
            path.push(segment);
        }
        Ok(path)
    }

    fn staging_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{}.partial", name))
    }

    async fn write_atomically(path: &Path, data: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let staging = Self::staging_path(path);
        if let Err(e) = fs::write(&staging, data).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e);
        }
        fs::rename(&staging, path).await
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<String> {
        let path = self.resolve(key)?;
        let start = std::time::Instant::now();

        Self::write_atomically(&path, &data).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Local write failed");
            StorageError::write(key, e)
        })?;

        tracing::info!(
            key = %key,
            content_type = %content_type,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Stored object on local disk"
        );

        Ok(format!("{}/{}", self.public_url, key))
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let path = self.resolve(key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::read(key, e)),
        }
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.resolve(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(key = %key, "Deleted object from local disk");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(key = %key, "Object already absent");
                Ok(())
            }
            Err(e) => Err(StorageError::remove(key, e)),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.resolve(key)?;
        Ok(fs::metadata(&path).await.map(|m| m.is_file()).unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
