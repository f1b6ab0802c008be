//! Media ingestion gateway
//!
//! Every public operation reports ordinary failures (policy violations,
//! storage errors, failed downloads, missing identifiers) as `false` or
//! `None` after logging them. Internal helpers propagate [`AppError`].

use std::sync::Arc;

use bytes::Bytes;
use foncii_core::{
    AppError, ErrorMetadata, LogLevel, MediaCategory, MediaConfig, MediaFormat, MediaType,
    MediaUpdateResult, UploadedMedia,
};
use foncii_processing::MediaPolicyValidator;
use foncii_storage::{
    permalink, post_media_path, post_thumbnail_path, profile_picture_path, Storage, StoragePath,
};

use crate::remote::RemoteFetcher;

/// Content type video thumbnails are stored under.
const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

/// New media for a post.
#[derive(Debug, Clone)]
pub enum PostUpload {
    Image(Bytes),
    Video { media: Bytes, thumbnail: Bytes },
}

impl PostUpload {
    pub fn media_type(&self) -> MediaType {
        match self {
            PostUpload::Image(_) => MediaType::Image,
            PostUpload::Video { .. } => MediaType::Video,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RemoteTarget {
    PostMedia,
    PostThumbnail,
}

/// Uploads and deletes post media and profile pictures, and imports remote media.
#[derive(Clone)]
pub struct MediaIngestionGateway {
    storage: Arc<dyn Storage>,
    fetcher: Arc<dyn RemoteFetcher>,
    bucket_domain: String,
    cdn_origin: String,
    diagnostics: bool,
}

impl MediaIngestionGateway {
    pub fn new(
        storage: Arc<dyn Storage>,
        fetcher: Arc<dyn RemoteFetcher>,
        bucket_domain: impl Into<String>,
        cdn_origin: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            fetcher,
            bucket_domain: bucket_domain.into(),
            cdn_origin: cdn_origin.into(),
            diagnostics: true,
        }
    }

    /// Build a gateway from configuration. Policy rejections are only logged
    /// outside production.
    pub fn from_config(
        config: &MediaConfig,
        storage: Arc<dyn Storage>,
        fetcher: Arc<dyn RemoteFetcher>,
    ) -> Self {
        Self::new(storage, fetcher, &config.bucket_domain, &config.cdn_origin)
            .with_diagnostics(!config.is_production())
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Permalink of a post's main media. `None` when an identifier is unusable.
    pub fn post_media_permalink(&self, owner_id: &str, post_id: &str) -> Option<String> {
        post_media_path(&self.bucket_domain, owner_id, post_id)
            .ok()
            .map(|path| self.permalink(&path))
    }

    pub fn post_thumbnail_permalink(&self, owner_id: &str, post_id: &str) -> Option<String> {
        post_thumbnail_path(&self.bucket_domain, owner_id, post_id)
            .ok()
            .map(|path| self.permalink(&path))
    }

    /// Replace or remove a post's media.
    ///
    /// `None` deletes the post's media (see [`Self::delete_media_for_post`]).
    /// `operation_succeeded` reflects the main media only; a failed thumbnail
    /// upload is logged and its permalink is still returned.
    #[tracing::instrument(skip(self, upload), fields(media_type))]
    pub async fn update_post_media(
        &self,
        owner_id: &str,
        post_id: &str,
        upload: Option<PostUpload>,
    ) -> MediaUpdateResult {
        let Some(upload) = upload else {
            return MediaUpdateResult::deleted(self.delete_media_for_post(owner_id, post_id).await);
        };

        tracing::Span::current().record("media_type", tracing::field::debug(upload.media_type()));

        match self.upload_post_media(owner_id, post_id, upload).await {
            Ok(media) => MediaUpdateResult::uploaded(media),
            Err(e) => {
                self.report("update_post_media", &e);
                MediaUpdateResult::failed()
            }
        }
    }

    /// Delete a post's thumbnail, then its main media.
    ///
    /// Returns the outcome of the main-media deletion. Thumbnail deletion
    /// failures are logged and ignored since image posts have no thumbnail.
    #[tracing::instrument(skip(self))]
    pub async fn delete_media_for_post(&self, owner_id: &str, post_id: &str) -> bool {
        if let Err(e) = self.require_ids(&[owner_id, post_id]) {
            self.report("delete_media_for_post", &e);
            return false;
        }

        let result = async {
            let thumbnail = post_thumbnail_path(&self.bucket_domain, owner_id, post_id)
                .map_err(|e| AppError::InvalidInput(e.to_string()))?;
            let media = post_media_path(&self.bucket_domain, owner_id, post_id)
                .map_err(|e| AppError::InvalidInput(e.to_string()))?;

            if let Err(e) = self.remove(&thumbnail).await {
                tracing::debug!(
                    key = %thumbnail.object_key(),
                    error = %e,
                    "Thumbnail delete failed, continuing with post media"
                );
            }

            self.remove(&media).await
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                self.report("delete_media_for_post", &e);
                false
            }
        }
    }

    /// Download `url` and store it as the post's main media.
    ///
    /// Returns the permalink, or `None` when the download fails or the server
    /// reports a content type that is not a supported post format.
    #[tracing::instrument(skip(self))]
    pub async fn upload_from_remote_url(
        &self,
        url: &str,
        post_id: &str,
        owner_id: &str,
    ) -> Option<String> {
        self.ingest_remote(url, owner_id, post_id, RemoteTarget::PostMedia)
            .await
    }

    /// Download `url` and store it as the post's video thumbnail.
    #[tracing::instrument(skip(self))]
    pub async fn upload_remote_thumbnail(
        &self,
        url: &str,
        post_id: &str,
        owner_id: &str,
    ) -> Option<String> {
        self.ingest_remote(url, owner_id, post_id, RemoteTarget::PostThumbnail)
            .await
    }

    /// Replace or remove a user's profile picture.
    #[tracing::instrument(skip(self, picture))]
    pub async fn update_user_profile_picture(
        &self,
        user_id: &str,
        picture: Option<Bytes>,
    ) -> MediaUpdateResult {
        let result = match picture {
            Some(data) => self
                .upload_profile_picture(user_id, data)
                .await
                .map(MediaUpdateResult::uploaded),
            None => self
                .delete_profile_picture(user_id)
                .await
                .map(|()| MediaUpdateResult::deleted(true)),
        };

        result.unwrap_or_else(|e| {
            self.report("update_user_profile_picture", &e);
            MediaUpdateResult::failed()
        })
    }

    async fn upload_post_media(
        &self,
        owner_id: &str,
        post_id: &str,
        upload: PostUpload,
    ) -> Result<UploadedMedia, AppError> {
        self.require_ids(&[owner_id, post_id])?;
        let media_path = post_media_path(&self.bucket_domain, owner_id, post_id)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        match upload {
            PostUpload::Image(data) => {
                let format = check_policy(&data, MediaCategory::PostImage)?;
                self.put(&media_path, data, content_type_of(format)?).await?;

                Ok(UploadedMedia {
                    media_type: MediaType::Image,
                    media_url: self.permalink(&media_path),
                    video_thumbnail_url: None,
                })
            }
            PostUpload::Video { media, thumbnail } => {
                let thumbnail_path = post_thumbnail_path(&self.bucket_domain, owner_id, post_id)
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;

                // Both buffers are checked before anything is written.
                check_policy(&thumbnail, MediaCategory::PostImage)?;
                let format = check_policy(&media, MediaCategory::PostVideo)?;

                if let Err(e) = self
                    .put(&thumbnail_path, thumbnail, THUMBNAIL_CONTENT_TYPE)
                    .await
                {
                    tracing::warn!(
                        key = %thumbnail_path.object_key(),
                        error = %e,
                        "Thumbnail upload failed, continuing with post media"
                    );
                }

                self.put(&media_path, media, content_type_of(format)?).await?;

                Ok(UploadedMedia {
                    media_type: MediaType::Video,
                    media_url: self.permalink(&media_path),
                    video_thumbnail_url: Some(self.permalink(&thumbnail_path)),
                })
            }
        }
    }

    async fn upload_profile_picture(
        &self,
        user_id: &str,
        data: Bytes,
    ) -> Result<UploadedMedia, AppError> {
        self.require_ids(&[user_id])?;
        let path = profile_picture_path(&self.bucket_domain, user_id)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let format = check_policy(&data, MediaCategory::ProfilePicture)?;
        self.put(&path, data, content_type_of(format)?).await?;

        Ok(UploadedMedia {
            media_type: MediaType::Image,
            media_url: self.permalink(&path),
            video_thumbnail_url: None,
        })
    }

    async fn delete_profile_picture(&self, user_id: &str) -> Result<(), AppError> {
        self.require_ids(&[user_id])?;
        let path = profile_picture_path(&self.bucket_domain, user_id)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        self.remove(&path).await
    }

    async fn ingest_remote(
        &self,
        url: &str,
        owner_id: &str,
        post_id: &str,
        target: RemoteTarget,
    ) -> Option<String> {
        match self.fetch_and_store(url, owner_id, post_id, target).await {
            Ok(link) => Some(link),
            Err(e) => {
                let operation = match target {
                    RemoteTarget::PostMedia => "upload_from_remote_url",
                    RemoteTarget::PostThumbnail => "upload_remote_thumbnail",
                };
                self.report(operation, &e);
                None
            }
        }
    }

    async fn fetch_and_store(
        &self,
        url: &str,
        owner_id: &str,
        post_id: &str,
        target: RemoteTarget,
    ) -> Result<String, AppError> {
        self.require_ids(&[url, owner_id, post_id])?;
        let path = match target {
            RemoteTarget::PostMedia => post_media_path(&self.bucket_domain, owner_id, post_id),
            RemoteTarget::PostThumbnail => {
                post_thumbnail_path(&self.bucket_domain, owner_id, post_id)
            }
        }
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let remote = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| AppError::RemoteFetch(e.to_string()))?;

        // Expired upstream links tend to answer with an HTML or XML error page.
        let format = MediaFormat::from_content_type(&remote.content_type)
            .ok_or_else(|| AppError::UnsupportedMediaType(remote.content_type.clone()))?;

        let category = if format.is_video() {
            MediaCategory::PostVideo
        } else {
            MediaCategory::PostImage
        };
        MediaPolicyValidator::validate_size(remote.data.len(), category)
            .map_err(|v| AppError::PolicyViolation(v.to_string()))?;

        self.put(&path, remote.data, &remote.content_type).await?;
        Ok(self.permalink(&path))
    }

    async fn put(
        &self,
        path: &StoragePath,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), AppError> {
        let key = path.object_key();
        let size = data.len();
        self.storage
            .put(&key, data, content_type)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        tracing::debug!(
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            "Stored media"
        );
        Ok(())
    }

    async fn remove(&self, path: &StoragePath) -> Result<(), AppError> {
        self.storage
            .delete(&path.object_key())
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }

    fn permalink(&self, path: &StoragePath) -> String {
        permalink(&self.cdn_origin, path)
    }

    fn require_ids(&self, ids: &[&str]) -> Result<(), AppError> {
        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(AppError::InvalidInput(
                "Missing required identifier".to_string(),
            ));
        }
        Ok(())
    }

    fn report(&self, operation: &'static str, err: &AppError) {
        match err.log_level() {
            LogLevel::Debug => {
                if self.diagnostics {
                    tracing::warn!(
                        operation,
                        error_code = err.error_code(),
                        error = %err,
                        "Media rejected"
                    );
                }
            }
            LogLevel::Warn => tracing::warn!(
                operation,
                error_code = err.error_code(),
                error = %err,
                "Media operation failed"
            ),
            LogLevel::Error => tracing::error!(
                operation,
                error_code = err.error_code(),
                error = %err,
                "Media operation failed"
            ),
        }
    }
}

fn check_policy(buffer: &[u8], category: MediaCategory) -> Result<MediaFormat, AppError> {
    MediaPolicyValidator::check(Some(buffer), category)
        .map_err(|v| AppError::PolicyViolation(v.to_string()))
}

fn content_type_of(format: MediaFormat) -> Result<&'static str, AppError> {
    format
        .content_type()
        .ok_or_else(|| AppError::Internal(format!("No content type for {:?}", format)))
}
