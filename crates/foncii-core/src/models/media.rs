use serde::{Deserialize, Serialize};

use crate::constants::{
    JPEG_CONTENT_TYPE, JPG_CONTENT_TYPE, MOV_CONTENT_TYPE, MP4_CONTENT_TYPE, PNG_CONTENT_TYPE,
    POST_IMAGE_MAX_BYTES, POST_VIDEO_MAX_BYTES, PROFILE_PICTURE_MAX_BYTES,
};

/// Media type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// Binary format of a media buffer, derived only from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    Jpeg,
    Png,
    Mp4,
    QuickTime,
    Unknown,
}

impl MediaFormat {
    /// Content type stored alongside an object of this format.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            MediaFormat::Jpeg => Some(JPEG_CONTENT_TYPE),
            MediaFormat::Png => Some(PNG_CONTENT_TYPE),
            MediaFormat::Mp4 => Some(MP4_CONTENT_TYPE),
            MediaFormat::QuickTime => Some(MOV_CONTENT_TYPE),
            MediaFormat::Unknown => None,
        }
    }

    /// Map a supported upload content type back to a format.
    ///
    /// Matching is case-insensitive and ignores parameters such as `; charset=...`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_lowercase();

        match essence.as_str() {
            JPG_CONTENT_TYPE | JPEG_CONTENT_TYPE => Some(MediaFormat::Jpeg),
            PNG_CONTENT_TYPE => Some(MediaFormat::Png),
            MP4_CONTENT_TYPE => Some(MediaFormat::Mp4),
            MOV_CONTENT_TYPE => Some(MediaFormat::QuickTime),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaFormat::Jpeg | MediaFormat::Png)
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaFormat::Mp4 | MediaFormat::QuickTime)
    }
}

/// Whether a content type reported by a remote server may be stored as post media.
pub fn is_supported_post_content_type(content_type: &str) -> bool {
    MediaFormat::from_content_type(content_type).is_some()
}

/// Upload category. Each category has exactly one size ceiling and one
/// allow-list of formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    ProfilePicture,
    PostImage,
    PostVideo,
}

impl MediaCategory {
    pub fn max_size_bytes(&self) -> usize {
        match self {
            MediaCategory::ProfilePicture => PROFILE_PICTURE_MAX_BYTES,
            MediaCategory::PostImage => POST_IMAGE_MAX_BYTES,
            MediaCategory::PostVideo => POST_VIDEO_MAX_BYTES,
        }
    }

    pub fn allowed_formats(&self) -> &'static [MediaFormat] {
        match self {
            MediaCategory::ProfilePicture | MediaCategory::PostImage => {
                &[MediaFormat::Jpeg, MediaFormat::Png]
            }
            MediaCategory::PostVideo => &[MediaFormat::Mp4, MediaFormat::QuickTime],
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            MediaCategory::ProfilePicture | MediaCategory::PostImage => MediaType::Image,
            MediaCategory::PostVideo => MediaType::Video,
        }
    }
}

/// Media written by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMedia {
    pub media_type: MediaType,
    pub media_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_thumbnail_url: Option<String>,
}

/// Outcome of an update (upload or deletion) of a post's or user's media.
///
/// `media` is only populated by a successful upload; deletions never set it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpdateResult {
    pub operation_succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<UploadedMedia>,
}

impl MediaUpdateResult {
    pub fn failed() -> Self {
        Self {
            operation_succeeded: false,
            media: None,
        }
    }

    pub fn deleted(succeeded: bool) -> Self {
        Self {
            operation_succeeded: succeeded,
            media: None,
        }
    }

    pub fn uploaded(media: UploadedMedia) -> Self {
        Self {
            operation_succeeded: true,
            media: Some(media),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_round_trip_for_known_formats() {
        for format in [
            MediaFormat::Jpeg,
            MediaFormat::Png,
            MediaFormat::Mp4,
            MediaFormat::QuickTime,
        ] {
            let ct = format.content_type().unwrap();
            assert_eq!(MediaFormat::from_content_type(ct), Some(format));
        }
        assert_eq!(MediaFormat::Unknown.content_type(), None);
    }

    #[test]
    fn test_from_content_type_normalizes() {
        assert_eq!(
            MediaFormat::from_content_type("IMAGE/JPG"),
            Some(MediaFormat::Jpeg)
        );
        assert_eq!(
            MediaFormat::from_content_type("video/mp4; codecs=avc1"),
            Some(MediaFormat::Mp4)
        );
        assert_eq!(MediaFormat::from_content_type("text/html"), None);
        assert_eq!(MediaFormat::from_content_type("video/quicktime"), None);
    }

    #[test]
    fn test_supported_post_content_types() {
        assert!(is_supported_post_content_type("image/png"));
        assert!(is_supported_post_content_type("video/mov"));
        assert!(!is_supported_post_content_type("application/xml"));
        assert!(!is_supported_post_content_type("image/gif"));
    }

    #[test]
    fn test_category_policy_table() {
        assert_eq!(MediaCategory::ProfilePicture.max_size_bytes(), 4 * 1024 * 1024);
        assert_eq!(MediaCategory::PostImage.max_size_bytes(), 30 * 1024 * 1024);
        assert_eq!(MediaCategory::PostVideo.max_size_bytes(), 200 * 1024 * 1024);
        assert!(MediaCategory::PostImage
            .allowed_formats()
            .contains(&MediaFormat::Png));
        assert!(!MediaCategory::PostImage
            .allowed_formats()
            .contains(&MediaFormat::Mp4));
        assert_eq!(MediaCategory::PostVideo.media_type(), MediaType::Video);
    }

    #[test]
    fn test_update_result_serializes_camel_case() {
        let result = MediaUpdateResult::uploaded(UploadedMedia {
            media_type: MediaType::Image,
            media_url: "https://cdn.foncii.com/abc".to_string(),
            video_thumbnail_url: None,
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["operationSucceeded"], true);
        assert_eq!(json["media"]["mediaType"], "image");
        assert!(json["media"].get("videoThumbnailUrl").is_none());

        let json = serde_json::to_value(MediaUpdateResult::deleted(true)).unwrap();
        assert!(json.get("media").is_none());
    }
}
