use bytes::Bytes;
use foncii_core::{MediaCategory, MediaFormat};
use foncii_processing::{classify_image, classify_video, MediaPolicyValidator};
use foncii_storage::{
    permalink, post_media_path, post_thumbnail_path, Storage, StoragePath, StorageResult,
};
use serde::Serialize;

/// Default log filter for CLI binaries.
pub const CLI_LOG_FILTER: &str = "foncii=info";

/// Policy outcome of a buffer for one category.
#[derive(Debug, Serialize)]
pub struct CategoryVerdict {
    pub category: MediaCategory,
    pub detected: MediaFormat,
    pub content_type: Option<&'static str>,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Check `buffer` against each of `categories`.
pub fn sniff_report(buffer: &[u8], categories: &[MediaCategory]) -> Vec<CategoryVerdict> {
    categories
        .iter()
        .map(|&category| {
            let detected = MediaPolicyValidator::classify(buffer, category);
            let outcome = MediaPolicyValidator::check(Some(buffer), category);
            CategoryVerdict {
                category,
                detected,
                content_type: detected.content_type(),
                accepted: outcome.is_ok(),
                reason: outcome.err().map(|v| v.to_string()),
            }
        })
        .collect()
}

/// Storage location of a post's media, or of its video thumbnail.
pub fn post_location(
    bucket_domain: &str,
    owner_id: &str,
    post_id: &str,
    thumbnail: bool,
) -> StorageResult<StoragePath> {
    if thumbnail {
        post_thumbnail_path(bucket_domain, owner_id, post_id)
    } else {
        post_media_path(bucket_domain, owner_id, post_id)
    }
}

/// What the configured backend holds at a storage path.
#[derive(Debug, Serialize)]
pub struct StoredObject {
    pub path: String,
    pub object_key: String,
    pub permalink: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected: Option<MediaFormat>,
}

fn detect_stored_format(data: &[u8]) -> MediaFormat {
    match classify_image(data) {
        MediaFormat::Unknown => classify_video(data),
        format => format,
    }
}

pub async fn stat_object(
    storage: &dyn Storage,
    path: &StoragePath,
    cdn_origin: &str,
) -> StorageResult<StoredObject> {
    let key = path.object_key();

    let (size_bytes, detected) = if storage.exists(&key).await? {
        let data = storage.get(&key).await?;
        (Some(data.len()), Some(detect_stored_format(&data)))
    } else {
        (None, None)
    };

    Ok(StoredObject {
        path: path.to_string(),
        permalink: permalink(cdn_origin, path),
        exists: size_bytes.is_some(),
        object_key: key,
        size_bytes,
        detected,
    })
}

/// Read back the stored bytes at `path`.
pub async fn fetch_object(storage: &dyn Storage, path: &StoragePath) -> StorageResult<Bytes> {
    storage.get(&path.object_key()).await
}
