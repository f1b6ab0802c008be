//! Foncii Storage Library
//!
//! This crate provides the storage abstraction used by media ingestion, its S3
//! and local filesystem implementations, and the deterministic storage path
//! and permalink scheme.
//!
//! # Storage path format
//!
//! Every object lives at a path derived only from its owner and logical name:
//!
//! - **Post media**: `<bucket>/media/user-generated-media/<owner>/posts/<post>`
//! - **Video thumbnails**: `<bucket>/media/user-generated-media/<owner>/posts/thumbnails/<post>`
//! - **Profile pictures**: `<bucket>/media/user-generated-media/<user>/profile-pictures/<user>`
//!
//! Re-uploading for the same post overwrites the previous object. Backends
//! receive the path without the bucket domain as their object key; permalinks
//! encode the full path.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use foncii_core::StorageBackend;
pub use keys::{
    build_path, permalink, post_media_path, post_thumbnail_path, profile_picture_path,
    StoragePath,
};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
