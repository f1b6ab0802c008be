//! Provider-aware image resize URL rewriter
//!
//! Image URLs reach the frontend from three backends, each with its own
//! resize grammar:
//!
//! - the first-party media server: `<permalink>=h<H>[-w<W>][-it<fit>][-at<fmt>][-q<Q>]`
//! - the Google Places photo CDN: `<url without =suffix>=s<H>[-w<W>]`
//! - the Yelp photo CDN: a fixed size code in the last path segment (`.../ls.jpg`)
//!
//! [`ImageUrlRewriter::classify`] tags a URL with its provider, and
//! [`ImageUrlRewriter::rewrite`] produces the provider-specific resize request.
//! URLs from any other host are returned unchanged.
//!
//! # Example
//!
//! ```rust
//! use foncii_core::resize_url::rewrite_image_url;
//! use foncii_core::{ImageFit, ResizeRequest};
//!
//! let request = ResizeRequest::new(300).with_width(200).with_fit(ImageFit::Cover);
//! let url = rewrite_image_url("https://cdn.foncii.com/Zm9v", &request);
//! assert_eq!(url, "https://cdn.foncii.com/Zm9v=h300-w200-itco");
//! ```

mod yelp;

pub use yelp::YelpSizeCode;

use crate::constants::{
    DEFAULT_FONCII_CDN_ORIGIN, DEFAULT_GOOGLE_PLACES_PHOTO_PATH, DEFAULT_YELP_CDN_ORIGIN,
};
use crate::models::ResizeRequest;

/// Substrings identifying each provider's URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOrigins {
    pub foncii_cdn: String,
    pub google_places: String,
    pub yelp_cdn: String,
}

impl Default for ProviderOrigins {
    fn default() -> Self {
        Self {
            foncii_cdn: DEFAULT_FONCII_CDN_ORIGIN.to_string(),
            google_places: DEFAULT_GOOGLE_PLACES_PHOTO_PATH.to_string(),
            yelp_cdn: DEFAULT_YELP_CDN_ORIGIN.to_string(),
        }
    }
}

/// An image URL tagged with the provider that serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderUrl<'a> {
    FonciiManaged(&'a str),
    GooglePlaces(&'a str),
    YelpCdn(&'a str),
    Unrecognized(&'a str),
}

impl<'a> ProviderUrl<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            ProviderUrl::FonciiManaged(url)
            | ProviderUrl::GooglePlaces(url)
            | ProviderUrl::YelpCdn(url)
            | ProviderUrl::Unrecognized(url) => url,
        }
    }
}

/// Stateless rewriter; safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct ImageUrlRewriter {
    origins: ProviderOrigins,
}

impl ImageUrlRewriter {
    pub fn new(origins: ProviderOrigins) -> Self {
        Self { origins }
    }

    pub fn origins(&self) -> &ProviderOrigins {
        &self.origins
    }

    /// Tag a URL with its provider. The provider substrings are disjoint, so
    /// at most one can match.
    pub fn classify<'a>(&self, url: &'a str) -> ProviderUrl<'a> {
        if contains_origin(url, &self.origins.foncii_cdn) {
            ProviderUrl::FonciiManaged(url)
        } else if contains_origin(url, &self.origins.google_places) {
            ProviderUrl::GooglePlaces(url)
        } else if contains_origin(url, &self.origins.yelp_cdn) {
            ProviderUrl::YelpCdn(url)
        } else {
            ProviderUrl::Unrecognized(url)
        }
    }

    /// Rewrite `url` into its provider's resize request for `request`.
    pub fn rewrite(&self, url: &str, request: &ResizeRequest) -> String {
        match self.classify(url) {
            ProviderUrl::FonciiManaged(url) => rewrite_foncii(url, request),
            ProviderUrl::GooglePlaces(url) => rewrite_google_places(url, request),
            ProviderUrl::YelpCdn(url) => yelp::rewrite(url, request),
            ProviderUrl::Unrecognized(url) => url.to_string(),
        }
    }
}

fn contains_origin(url: &str, origin: &str) -> bool {
    !origin.is_empty() && url.contains(origin)
}

/// Rewrite using the default production origins.
pub fn rewrite_image_url(url: &str, request: &ResizeRequest) -> String {
    ImageUrlRewriter::default().rewrite(url, request)
}

/// Build the first-party parameter string, e.g. `h300-w200-itco-atf3-q80`.
///
/// Height always leads; the optional segments follow in fixed order.
pub fn foncii_resize_params(request: &ResizeRequest) -> String {
    let mut params = vec![format!("h{}", request.height)];

    if let Some(width) = request.width {
        params.push(format!("w{}", width));
    }
    if let Some(fit) = request.fit {
        params.push(format!("it{}", fit.code()));
    }
    if let Some(format) = request.format {
        params.push(format!("at{}", format.code()));
    }
    if let Some(quality) = request.quality {
        params.push(format!("q{}", quality.min(100)));
    }

    params.join("-")
}

fn rewrite_foncii(url: &str, request: &ResizeRequest) -> String {
    format!("{}={}", url, foncii_resize_params(request))
}

fn rewrite_google_places(url: &str, request: &ResizeRequest) -> String {
    let base = match url.rfind('=') {
        Some(idx) => &url[..idx],
        None => url,
    };

    match request.width {
        Some(width) => format!("{}=s{}-w{}", base, request.height, width),
        None => format!("{}=s{}", base, request.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageFit, ImageOutputFormat};

    const FONCII_URL: &str = "https://cdn.foncii.com/Zm9uY2lpLW1lZGlh";
    const GOOGLE_URL: &str =
        "https://lh3.googleusercontent.com/places/ANXAkqGx1-abc=s1600-w1600";
    const YELP_URL: &str = "https://s3-media2.fl.yelpcdn.com/bphoto/xyzAbC123/o.jpg";

    #[test]
    fn test_classify_providers() {
        let rewriter = ImageUrlRewriter::default();
        assert_eq!(
            rewriter.classify(FONCII_URL),
            ProviderUrl::FonciiManaged(FONCII_URL)
        );
        assert_eq!(
            rewriter.classify(GOOGLE_URL),
            ProviderUrl::GooglePlaces(GOOGLE_URL)
        );
        assert_eq!(rewriter.classify(YELP_URL), ProviderUrl::YelpCdn(YELP_URL));
        assert_eq!(
            rewriter.classify("https://example.com/a.png"),
            ProviderUrl::Unrecognized("https://example.com/a.png")
        );
        assert_eq!(rewriter.classify(YELP_URL).as_str(), YELP_URL);
    }

    #[test]
    fn test_foncii_height_only() {
        let url = rewrite_image_url(FONCII_URL, &ResizeRequest::new(250));
        assert_eq!(url, format!("{}=h250", FONCII_URL));
    }

    #[test]
    fn test_foncii_all_segments_in_order() {
        let request = ResizeRequest::new(300)
            .with_width(200)
            .with_fit(ImageFit::Cover)
            .with_format(ImageOutputFormat::Webp)
            .with_quality(80);
        let url = rewrite_image_url(FONCII_URL, &request);
        assert_eq!(url, format!("{}=h300-w200-itco-atf3-q80", FONCII_URL));
    }

    #[test]
    fn test_foncii_skips_absent_segments() {
        let request = ResizeRequest::new(64)
            .with_format(ImageOutputFormat::Png)
            .with_quality(50);
        assert_eq!(foncii_resize_params(&request), "h64-atf4-q50");

        let request = ResizeRequest::new(64).with_fit(ImageFit::Inside);
        assert_eq!(foncii_resize_params(&request), "h64-itin");
    }

    #[test]
    fn test_foncii_quality_is_capped_when_set_directly() {
        let mut request = ResizeRequest::new(120);
        request.quality = Some(250);
        assert_eq!(foncii_resize_params(&request), "h120-q100");
        assert_eq!(
            rewrite_image_url(FONCII_URL, &request),
            format!("{}=h120-q100", FONCII_URL)
        );
    }

    #[test]
    fn test_yelp_through_public_entry_points() {
        let request = ResizeRequest::new(100).with_width(300);
        let expected = "https://s3-media2.fl.yelpcdn.com/bphoto/xyzAbC123/m.jpg";
        assert_eq!(rewrite_image_url(YELP_URL, &request), expected);
        assert_eq!(ImageUrlRewriter::default().rewrite(YELP_URL, &request), expected);

        let large = ResizeRequest::new(1200).with_width(900);
        assert_eq!(
            rewrite_image_url(YELP_URL, &large),
            "https://s3-media2.fl.yelpcdn.com/bphoto/xyzAbC123/o.jpg"
        );
    }

    #[test]
    fn test_google_replaces_existing_suffix() {
        let url = rewrite_image_url(GOOGLE_URL, &ResizeRequest::new(400).with_width(300));
        assert_eq!(
            url,
            "https://lh3.googleusercontent.com/places/ANXAkqGx1-abc=s400-w300"
        );
    }

    #[test]
    fn test_google_without_suffix() {
        let url = "https://lh3.googleusercontent.com/places/ANXAkqGx1-abc";
        assert_eq!(
            rewrite_image_url(url, &ResizeRequest::new(120)),
            format!("{}=s120", url)
        );
    }

    #[test]
    fn test_google_ignores_fit_format_quality() {
        let request = ResizeRequest::new(90)
            .with_fit(ImageFit::Fill)
            .with_format(ImageOutputFormat::Heif)
            .with_quality(10);
        assert_eq!(
            rewrite_image_url(GOOGLE_URL, &request),
            "https://lh3.googleusercontent.com/places/ANXAkqGx1-abc=s90"
        );
    }

    #[test]
    fn test_unrecognized_is_unchanged_for_any_request() {
        let urls = [
            "https://example.com/photo.jpg",
            "https://images.unsplash.com/photo-123?w=400",
            "",
            "not a url at all",
        ];
        let requests = [
            ResizeRequest::new(1),
            ResizeRequest::new(4000)
                .with_width(10)
                .with_fit(ImageFit::Contain)
                .with_format(ImageOutputFormat::Jpg)
                .with_quality(100),
        ];
        for url in urls {
            for request in &requests {
                assert_eq!(rewrite_image_url(url, request), url);
            }
        }
    }

    #[test]
    fn test_custom_origins() {
        let rewriter = ImageUrlRewriter::new(ProviderOrigins {
            foncii_cdn: "https://staging-cdn.foncii.com/".to_string(),
            ..ProviderOrigins::default()
        });
        assert_eq!(
            rewriter.rewrite("https://staging-cdn.foncii.com/abc", &ResizeRequest::new(5)),
            "https://staging-cdn.foncii.com/abc=h5"
        );
        // The production CDN is not first-party for this rewriter.
        assert_eq!(
            rewriter.rewrite(FONCII_URL, &ResizeRequest::new(5)),
            FONCII_URL
        );
    }

    #[test]
    fn test_empty_origin_never_matches() {
        let rewriter = ImageUrlRewriter::new(ProviderOrigins {
            foncii_cdn: String::new(),
            ..ProviderOrigins::default()
        });
        assert_eq!(
            rewriter.classify("https://example.com/x"),
            ProviderUrl::Unrecognized("https://example.com/x")
        );
    }
}
