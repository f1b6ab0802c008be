//! Foncii Media Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! provider-aware image resize URL rewriter shared by every Foncii media crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod resize_url;
pub mod storage_types;

// Re-export commonly used types
pub use config::{LogFormat, MediaConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    ImageFit, ImageOutputFormat, MediaCategory, MediaFormat, MediaType, MediaUpdateResult,
    ResizeRequest, UploadedMedia,
};
pub use resize_url::{rewrite_image_url, ImageUrlRewriter, ProviderOrigins, ProviderUrl};
pub use storage_types::StorageBackend;
