use foncii_core::{MediaCategory, MediaFormat};

use crate::sniffer::{classify_image, classify_video};

/// Why a buffer was rejected for a category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("No media provided")]
    Missing,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported format {detected:?} for {category:?} (allowed: {allowed:?})")]
    UnsupportedFormat {
        detected: MediaFormat,
        category: MediaCategory,
        allowed: &'static [MediaFormat],
    },
}

/// Media upload policy
///
/// Each category has one size ceiling and one allow-list of formats. Image
/// categories are classified with the image sniffer only and `PostVideo` with
/// the video sniffer only, so a post-image check never accepts video bytes.
pub struct MediaPolicyValidator;

impl MediaPolicyValidator {
    /// Classify `buffer` the way `category` is checked.
    pub fn classify(buffer: &[u8], category: MediaCategory) -> MediaFormat {
        match category {
            MediaCategory::ProfilePicture | MediaCategory::PostImage => classify_image(buffer),
            MediaCategory::PostVideo => classify_video(buffer),
        }
    }

    /// Validate file size against the category ceiling
    pub fn validate_size(size: usize, category: MediaCategory) -> Result<(), PolicyViolation> {
        let max = category.max_size_bytes();
        if size > max {
            return Err(PolicyViolation::TooLarge { size, max });
        }
        Ok(())
    }

    /// Validate the detected format against the category allow-list
    pub fn validate_format(
        buffer: &[u8],
        category: MediaCategory,
    ) -> Result<MediaFormat, PolicyViolation> {
        let detected = Self::classify(buffer, category);
        let allowed = category.allowed_formats();
        if !allowed.contains(&detected) {
            return Err(PolicyViolation::UnsupportedFormat {
                detected,
                category,
                allowed,
            });
        }
        Ok(detected)
    }

    /// Run both checks and return the detected format on success.
    ///
    /// The size check runs first, so an oversized buffer of the wrong format
    /// reports `TooLarge`.
    pub fn check(
        buffer: Option<&[u8]>,
        category: MediaCategory,
    ) -> Result<MediaFormat, PolicyViolation> {
        let buffer = buffer.ok_or(PolicyViolation::Missing)?;
        Self::validate_size(buffer.len(), category)?;
        Self::validate_format(buffer, category)
    }

    pub fn is_valid(buffer: Option<&[u8]>, category: MediaCategory) -> bool {
        match Self::check(buffer, category) {
            Ok(_) => true,
            Err(violation) => {
                tracing::debug!(?category, error = %violation, "Media failed upload policy");
                false
            }
        }
    }
}
