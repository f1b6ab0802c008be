use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use foncii_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// One call made against [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Upload { key: String, content_type: String },
    Delete { key: String },
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

/// In-memory storage that records every call and can be told to fail on
/// specific keys.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
    ops: Mutex<Vec<StorageOp>>,
    failing_keys: HashSet<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail uploads and deletes on `key`.
    pub fn failing_on(mut self, key: impl Into<String>) -> Self {
        self.failing_keys.insert(key.into());
        self
    }

    pub fn with_object(self, key: &str, data: Bytes, content_type: &str) -> Self {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        self
    }

    pub fn ops(&self) -> Vec<StorageOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<String> {
        self.ops.lock().unwrap().push(StorageOp::Upload {
            key: key.to_string(),
            content_type: content_type.to_string(),
        });
        if self.failing_keys.contains(key) {
            return Err(StorageError::write(key, "injected failure"));
        }
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("memory://{}", key))
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.object(key)
            .map(|o| o.data)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.ops.lock().unwrap().push(StorageOp::Delete {
            key: key.to_string(),
        });
        if self.failing_keys.contains(key) {
            return Err(StorageError::remove(key, "injected failure"));
        }
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
