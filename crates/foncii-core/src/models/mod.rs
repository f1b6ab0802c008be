pub mod media;
pub mod resize;

pub use media::{
    is_supported_post_content_type, MediaCategory, MediaFormat, MediaType, MediaUpdateResult,
    UploadedMedia,
};
pub use resize::{ImageFit, ImageOutputFormat, ResizeRequest};
