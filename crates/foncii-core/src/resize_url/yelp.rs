//! Yelp photo CDN size codes.
//!
//! Yelp serves each business photo in a fixed set of sizes, selected by the
//! file stem of the last path segment (`.../bphoto/<id>/ls.jpg`). A resize
//! request is rounded up to the smallest bucket that covers the smaller of
//! the requested dimensions.

use crate::models::ResizeRequest;

/// Size codes Yelp accepts in the trailing path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YelpSizeCode {
    Small,
    SmallSquare,
    Medium,
    MediumSquare,
    Large,
    LargeSquare,
    Original,
    Square348,
}

impl YelpSizeCode {
    pub fn code(&self) -> &'static str {
        match self {
            YelpSizeCode::Small => "s",
            YelpSizeCode::SmallSquare => "ss",
            YelpSizeCode::Medium => "m",
            YelpSizeCode::MediumSquare => "ms",
            YelpSizeCode::Large => "l",
            YelpSizeCode::LargeSquare => "ls",
            YelpSizeCode::Original => "o",
            YelpSizeCode::Square348 => "348s",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "s" => Some(YelpSizeCode::Small),
            "ss" => Some(YelpSizeCode::SmallSquare),
            "m" => Some(YelpSizeCode::Medium),
            "ms" => Some(YelpSizeCode::MediumSquare),
            "l" => Some(YelpSizeCode::Large),
            "ls" => Some(YelpSizeCode::LargeSquare),
            "o" => Some(YelpSizeCode::Original),
            "348s" => Some(YelpSizeCode::Square348),
            _ => None,
        }
    }

    /// Smallest bucket covering `dimension` pixels.
    pub fn for_dimension(dimension: u32) -> Self {
        match dimension {
            0..=40 => YelpSizeCode::Small,
            41..=100 => YelpSizeCode::Medium,
            101..=250 => YelpSizeCode::LargeSquare,
            251..=348 => YelpSizeCode::Large,
            _ => YelpSizeCode::Original,
        }
    }
}

/// Replace the size code of a Yelp photo URL, keeping its extension.
///
/// URLs whose trailing segment is not `<known code>.<ext>` are returned unchanged.
pub(super) fn rewrite(url: &str, request: &ResizeRequest) -> String {
    let Some(slash) = url.rfind('/') else {
        return url.to_string();
    };
    let (prefix, segment) = url.split_at(slash + 1);

    let Some((current_code, extension)) = segment.split_once('.') else {
        return url.to_string();
    };

    if YelpSizeCode::from_code(current_code).is_none() {
        tracing::debug!(
            url = %url,
            code = %current_code,
            "Unrecognized Yelp size code, leaving URL as-is"
        );
        return url.to_string();
    }

    let target = YelpSizeCode::for_dimension(request.smallest_dimension());
    format!("{}{}.{}", prefix, target.code(), extension)
}
