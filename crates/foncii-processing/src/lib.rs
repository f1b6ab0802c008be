//! Foncii Processing Library
//!
//! Byte-level classification of uploaded media and the per-category upload
//! policy. Nothing here trusts a client-supplied content type.

pub mod sniffer;
pub mod validator;

pub use sniffer::{classify_image, classify_video, detect_content_type};
pub use validator::{MediaPolicyValidator, PolicyViolation};
