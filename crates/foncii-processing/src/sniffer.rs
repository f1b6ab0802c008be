//! Magic-number format detection.
//!
//! | Format    | Offset | Bytes           |
//! |-----------|--------|-----------------|
//! | JPEG      | 0      | `FF D8`         |
//! | PNG       | 0      | `89 50 4E 47`   |
//! | MP4       | 4      | `ftyp`          |
//! | QuickTime | 0      | `moov`          |
//!
//! The QuickTime rule only looks at the first atom. MOV files that open with
//! `ftyp`, `wide` or `free` are not recognized as QuickTime (an `ftyp`-led MOV
//! is reported as MP4). Upload routing depends on this exact outcome, so the
//! rule is kept as-is.

use foncii_core::{MediaFormat, MediaType};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const MP4_FTYP: &[u8] = b"ftyp";
const MOV_MOOV: &[u8] = b"moov";

/// Classify an image buffer. Returns `Unknown` for anything that is not JPEG or PNG.
pub fn classify_image(buffer: &[u8]) -> MediaFormat {
    if buffer.starts_with(JPEG_MAGIC) {
        MediaFormat::Jpeg
    } else if buffer.starts_with(PNG_MAGIC) {
        MediaFormat::Png
    } else {
        MediaFormat::Unknown
    }
}

/// Classify a video buffer. Returns `Unknown` for anything that is not MP4 or QuickTime.
pub fn classify_video(buffer: &[u8]) -> MediaFormat {
    if buffer.get(4..8) == Some(MP4_FTYP) {
        MediaFormat::Mp4
    } else if buffer.starts_with(MOV_MOOV) {
        MediaFormat::QuickTime
    } else {
        MediaFormat::Unknown
    }
}

/// Content type to store a buffer under, using the classifier for `media_type`.
pub fn detect_content_type(buffer: &[u8], media_type: MediaType) -> Option<&'static str> {
    let format = match media_type {
        MediaType::Image => classify_image(buffer),
        MediaType::Video => classify_video(buffer),
    };
    format.content_type()
}
