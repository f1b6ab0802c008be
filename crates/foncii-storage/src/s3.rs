use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, Error as ObjectStoreError, ObjectStoreExt, PutOptions,
    PutPayload,
};

/// S3 (or S3-compatible) bucket.
///
/// Credentials come from the standard `AWS_*` environment variables. The
/// content type is stored as object metadata so the CDN serves objects with
/// the type detected at upload.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    public_base: String,
}

impl S3Storage {
    /// `endpoint` selects an S3-compatible provider (MinIO, GCS interop);
    /// objects are then addressed path-style under it.
    pub async fn new(
        bucket: String,
        region: String,
        endpoint: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&bucket)
            .with_region(&region);

        let public_base = match endpoint.as_deref() {
            Some(endpoint) => {
                builder = builder
                    .with_endpoint(endpoint)
                    .with_allow_http(endpoint.starts_with("http://"));
                format!("{}/{}", endpoint.trim_end_matches('/'), bucket)
            }
            None => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
        };

        let store = builder
            .build()
            .map_err(|e| StorageError::Misconfigured(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            public_base,
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<String> {
        let start = std::time::Instant::now();
        let size_bytes = data.len();

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        // `put_opts` lives on the base `ObjectStore` trait.
        object_store::ObjectStore::put_opts(
            &self.store,
            &Path::from(key),
            PutPayload::from(data),
            options,
        )
        .await
        .map_err(|e| {
            tracing::error!(bucket = %self.bucket, key = %key, error = %e, "S3 put failed");
            StorageError::write(key, e)
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            content_type = %content_type,
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Stored object in S3"
        );

        Ok(self.object_url(key))
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let object = match self.store.get(&Path::from(key)).await {
            Ok(object) => object,
            Err(ObjectStoreError::NotFound { .. }) => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => return Err(StorageError::read(key, e)),
        };

        object.bytes().await.map_err(|e| StorageError::read(key, e))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        match self.store.delete(&Path::from(key)).await {
            Ok(()) => {
                tracing::info!(bucket = %self.bucket, key = %key, "Deleted object from S3");
                Ok(())
            }
            Err(ObjectStoreError::NotFound { .. }) => Ok(()),
            Err(e) => {
                tracing::error!(bucket = %self.bucket, key = %key, error = %e, "S3 delete failed");
                Err(StorageError::remove(key, e))
            }
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        match self.store.head(&Path::from(key)).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
