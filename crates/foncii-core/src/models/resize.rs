use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an image is cropped or scaled into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    Contain,
    Cover,
    Fill,
    Inside,
    Outside,
}

impl ImageFit {
    /// Code used by the first-party media server's `it` parameter.
    pub fn code(&self) -> &'static str {
        match self {
            ImageFit::Contain => "cn",
            ImageFit::Cover => "co",
            ImageFit::Fill => "fl",
            ImageFit::Inside => "in",
            ImageFit::Outside => "ou",
        }
    }
}

impl FromStr for ImageFit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contain" => Ok(ImageFit::Contain),
            "cover" => Ok(ImageFit::Cover),
            "fill" => Ok(ImageFit::Fill),
            "inside" => Ok(ImageFit::Inside),
            "outside" => Ok(ImageFit::Outside),
            _ => Err(format!(
                "Invalid fit: {}. Use contain, cover, fill, inside or outside",
                s
            )),
        }
    }
}

/// Target encoding requested from the first-party media server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageOutputFormat {
    Jpg,
    Jpeg,
    Webp,
    Png,
    Heif,
}

impl ImageOutputFormat {
    /// Code used by the first-party media server's `at` parameter.
    pub fn code(&self) -> &'static str {
        match self {
            ImageOutputFormat::Jpg => "f1",
            ImageOutputFormat::Jpeg => "f2",
            ImageOutputFormat::Webp => "f3",
            ImageOutputFormat::Png => "f4",
            ImageOutputFormat::Heif => "f5",
        }
    }
}

impl FromStr for ImageOutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" => Ok(ImageOutputFormat::Jpg),
            "jpeg" => Ok(ImageOutputFormat::Jpeg),
            "webp" => Ok(ImageOutputFormat::Webp),
            "png" => Ok(ImageOutputFormat::Png),
            "heif" => Ok(ImageOutputFormat::Heif),
            _ => Err(format!(
                "Invalid format: {}. Use jpg, jpeg, webp, png or heif",
                s
            )),
        }
    }
}

/// Desired output parameters for a resized image.
///
/// Height is always present and is the dominant dimension when a provider can
/// only honor one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub height: u32,
    pub width: Option<u32>,
    pub fit: Option<ImageFit>,
    pub format: Option<ImageOutputFormat>,
    pub quality: Option<u8>,
}

impl ResizeRequest {
    pub fn new(height: u32) -> Self {
        Self {
            height,
            width: None,
            fit: None,
            format: None,
            quality: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_fit(mut self, fit: ImageFit) -> Self {
        self.fit = Some(fit);
        self
    }

    pub fn with_format(mut self, format: ImageOutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Quality is clamped to 100.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.min(100));
        self
    }

    /// The smaller of the requested dimensions (height when no width is given).
    pub fn smallest_dimension(&self) -> u32 {
        match self.width {
            Some(width) => width.min(self.height),
            None => self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_codes() {
        assert_eq!("contain".parse::<ImageFit>().unwrap().code(), "cn");
        assert_eq!("COVER".parse::<ImageFit>().unwrap().code(), "co");
        assert_eq!(ImageFit::Fill.code(), "fl");
        assert_eq!(ImageFit::Inside.code(), "in");
        assert_eq!(ImageFit::Outside.code(), "ou");
        assert!("stretch".parse::<ImageFit>().is_err());
    }

    #[test]
    fn test_format_codes() {
        let codes: Vec<&str> = ["jpg", "jpeg", "webp", "png", "heif"]
            .iter()
            .map(|f| f.parse::<ImageOutputFormat>().unwrap().code())
            .collect();
        assert_eq!(codes, vec!["f1", "f2", "f3", "f4", "f5"]);
        assert!("avif".parse::<ImageOutputFormat>().is_err());
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(ResizeRequest::new(10).with_quality(250).quality, Some(100));
        assert_eq!(ResizeRequest::new(10).with_quality(0).quality, Some(0));
    }

    #[test]
    fn test_smallest_dimension() {
        assert_eq!(ResizeRequest::new(300).smallest_dimension(), 300);
        assert_eq!(ResizeRequest::new(300).with_width(120).smallest_dimension(), 120);
        assert_eq!(ResizeRequest::new(80).with_width(500).smallest_dimension(), 80);
    }
}
