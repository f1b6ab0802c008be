//! Deterministic storage paths and permalinks.
//!
//! Path format: `<bucket-domain>/<dir>.../<owner-id>/<owner-dir>.../<filename>`.
//! The same inputs always produce the same path, so uploads, deletions and
//! permalinks for a post agree without any stored state.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use foncii_core::constants::dirs;

use crate::traits::{StorageError, StorageResult};

/// A hierarchical storage location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath {
    bucket_domain: String,
    directories: Vec<String>,
    owner_id: String,
    owner_directories: Vec<String>,
    filename: String,
}

impl StoragePath {
    pub fn bucket_domain(&self) -> &str {
        &self.bucket_domain
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// All segments after the bucket domain, in order.
    pub fn key_segments(&self) -> impl Iterator<Item = &str> {
        self.directories
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.owner_id.as_str()))
            .chain(self.owner_directories.iter().map(String::as_str))
            .chain(std::iter::once(self.filename.as_str()))
    }

    /// Object key within the bucket (the path without the bucket domain).
    pub fn object_key(&self) -> String {
        self.key_segments().collect::<Vec<_>>().join("/")
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket_domain, self.object_key())
    }
}

fn validate_segment(kind: &str, segment: &str) -> StorageResult<()> {
    if segment.is_empty() {
        return Err(StorageError::InvalidKey(format!("{} must not be empty", kind)));
    }
    if segment.contains('/') || segment == "." || segment == ".." {
        return Err(StorageError::InvalidKey(format!(
            "{} '{}' must be a single path segment",
            kind, segment
        )));
    }
    Ok(())
}

/// Build a storage path.
///
/// Segments are concatenated in exactly the given order: bucket domain,
/// `directories`, owner id, `owner_directories`, filename. Callers encode the
/// folder hierarchy through the order of the directory lists.
pub fn build_path(
    bucket_domain: &str,
    directories: &[&str],
    owner_id: &str,
    owner_directories: &[&str],
    filename: &str,
) -> StorageResult<StoragePath> {
    validate_segment("bucket domain", bucket_domain)?;
    for dir in directories.iter().chain(owner_directories) {
        validate_segment("directory", dir)?;
    }
    validate_segment("owner id", owner_id)?;
    validate_segment("filename", filename)?;

    Ok(StoragePath {
        bucket_domain: bucket_domain.to_string(),
        directories: directories.iter().map(|d| d.to_string()).collect(),
        owner_id: owner_id.to_string(),
        owner_directories: owner_directories.iter().map(|d| d.to_string()).collect(),
        filename: filename.to_string(),
    })
}

const USER_MEDIA_ROOT: &[&str] = &[dirs::MEDIA, dirs::USER_GENERATED_MEDIA];

/// A post id may not name a directory that sits next to post files.
fn validate_post_id(post_id: &str) -> StorageResult<()> {
    if post_id == dirs::THUMBNAILS {
        return Err(StorageError::InvalidKey(format!(
            "post id '{}' is reserved",
            post_id
        )));
    }
    Ok(())
}

/// Main media of a post. The filename is the post id, without extension.
pub fn post_media_path(
    bucket_domain: &str,
    owner_id: &str,
    post_id: &str,
) -> StorageResult<StoragePath> {
    validate_post_id(post_id)?;
    build_path(bucket_domain, USER_MEDIA_ROOT, owner_id, &[dirs::POSTS], post_id)
}

/// Thumbnail of a video post.
pub fn post_thumbnail_path(
    bucket_domain: &str,
    owner_id: &str,
    post_id: &str,
) -> StorageResult<StoragePath> {
    validate_post_id(post_id)?;
    build_path(
        bucket_domain,
        USER_MEDIA_ROOT,
        owner_id,
        &[dirs::POSTS, dirs::THUMBNAILS],
        post_id,
    )
}

/// A user's profile picture. Each user has exactly one.
pub fn profile_picture_path(bucket_domain: &str, user_id: &str) -> StorageResult<StoragePath> {
    build_path(
        bucket_domain,
        USER_MEDIA_ROOT,
        user_id,
        &[dirs::PROFILE_PICTURES],
        user_id,
    )
}

/// CDN permalink for a storage path: the origin followed by the url-safe,
/// unpadded base64 encoding of the full path string.
///
/// This is the only place permalinks are built.
pub fn permalink(cdn_origin: &str, path: &StoragePath) -> String {
    format!("{}{}", cdn_origin, URL_SAFE_NO_PAD.encode(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUCKET: &str = "foncii-media.appspot.com";
    const CDN: &str = "https://cdn.foncii.com/";

    #[test]
    fn test_post_media_path_layout() {
        let path = post_media_path(BUCKET, "u1", "p1").unwrap();
        assert_eq!(
            path.to_string(),
            "foncii-media.appspot.com/media/user-generated-media/u1/posts/p1"
        );
        assert_eq!(path.object_key(), "media/user-generated-media/u1/posts/p1");
        assert_eq!(path.owner_id(), "u1");
        assert_eq!(path.filename(), "p1");
    }

    #[test]
    fn test_thumbnail_path_layout() {
        let path = post_thumbnail_path(BUCKET, "u1", "p1").unwrap();
        assert_eq!(
            path.object_key(),
            "media/user-generated-media/u1/posts/thumbnails/p1"
        );
    }

    #[test]
    fn test_profile_picture_path_layout() {
        let path = profile_picture_path(BUCKET, "u9").unwrap();
        assert_eq!(
            path.object_key(),
            "media/user-generated-media/u9/profile-pictures/u9"
        );
    }

    #[test]
    fn test_build_path_is_deterministic() {
        let a = build_path(BUCKET, &["a", "b"], "owner", &["c"], "file").unwrap();
        let b = build_path(BUCKET, &["a", "b"], "owner", &["c"], "file").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(permalink(CDN, &a), permalink(CDN, &b));
    }

    #[test]
    fn test_build_path_keeps_caller_order() {
        let path = build_path(BUCKET, &["b", "a"], "o", &[], "f").unwrap();
        assert_eq!(path.object_key(), "b/a/o/f");
    }

    #[test]
    fn test_media_and_thumbnail_do_not_collide() {
        let media = post_media_path(BUCKET, "u1", "p1").unwrap();
        let thumb = post_thumbnail_path(BUCKET, "u1", "p1").unwrap();
        assert_ne!(media, thumb);
        assert_ne!(permalink(CDN, &media), permalink(CDN, &thumb));
    }

    #[test]
    fn test_rejects_bad_segments() {
        assert!(post_media_path(BUCKET, "", "p1").is_err());
        assert!(post_media_path(BUCKET, "u1", "").is_err());
        assert!(post_media_path(BUCKET, "u1/../x", "p1").is_err());
        assert!(post_media_path(BUCKET, "..", "p1").is_err());
        assert!(build_path(BUCKET, &[""], "u1", &[], "p1").is_err());
        assert!(build_path("", &[], "u1", &[], "p1").is_err());
    }

    #[test]
    fn test_thumbnail_directory_name_is_not_a_post_id() {
        assert!(matches!(
            post_media_path(BUCKET, "u1", "thumbnails"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(post_thumbnail_path(BUCKET, "u1", "thumbnails").is_err());
        // Only the exact directory name is reserved.
        assert!(post_media_path(BUCKET, "u1", "thumbnails-2").is_ok());
        assert!(post_media_path(BUCKET, "thumbnails", "p1").is_ok());
    }

    #[test]
    fn test_permalink_encoding() {
        let path = post_media_path(BUCKET, "u1", "p1").unwrap();
        let link = permalink(CDN, &path);
        let encoded = link.strip_prefix(CDN).unwrap();

        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));

        let decoded = URL_SAFE_NO_PAD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), path.to_string());
    }
}
