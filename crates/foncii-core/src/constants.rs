//! Constants shared across Foncii media crates.

const MIB: usize = 1024 * 1024;

/// Size ceiling for user profile pictures.
pub const PROFILE_PICTURE_MAX_BYTES: usize = 4 * MIB;

/// Size ceiling for post images and video thumbnails.
pub const POST_IMAGE_MAX_BYTES: usize = 30 * MIB;

/// Size ceiling for post videos.
pub const POST_VIDEO_MAX_BYTES: usize = 200 * MIB;

pub const JPG_CONTENT_TYPE: &str = "image/jpg";
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";
pub const PNG_CONTENT_TYPE: &str = "image/png";
pub const MP4_CONTENT_TYPE: &str = "video/mp4";
pub const MOV_CONTENT_TYPE: &str = "video/mov";

/// Content types accepted for post media, whether uploaded directly or
/// downloaded from a remote URL.
pub const SUPPORTED_POST_CONTENT_TYPES: &[&str] = &[
    JPG_CONTENT_TYPE,
    JPEG_CONTENT_TYPE,
    PNG_CONTENT_TYPE,
    MP4_CONTENT_TYPE,
    MOV_CONTENT_TYPE,
];

/// Default storage bucket domain, first segment of every storage path.
pub const DEFAULT_BUCKET_DOMAIN: &str = "foncii-media.appspot.com";

/// Origin of the first-party media server. Permalinks are this origin
/// followed by the url-safe base64 encoding of the storage path.
pub const DEFAULT_FONCII_CDN_ORIGIN: &str = "https://cdn.foncii.com/";

/// Path fragment identifying Google Places photo CDN URLs.
pub const DEFAULT_GOOGLE_PLACES_PHOTO_PATH: &str = "googleusercontent.com/places/";

/// Origin fragment identifying Yelp business photo CDN URLs.
pub const DEFAULT_YELP_CDN_ORIGIN: &str = "fl.yelpcdn.com/bphoto/";

/// Storage directory names. The hierarchy is browsed by hand when bulk
/// deleting, so these must not change.
pub mod dirs {
    pub const MEDIA: &str = "media";
    pub const USER_GENERATED_MEDIA: &str = "user-generated-media";
    pub const POSTS: &str = "posts";
    pub const THUMBNAILS: &str = "thumbnails";
    pub const PROFILE_PICTURES: &str = "profile-pictures";
}
