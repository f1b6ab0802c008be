//! Error types module
//!
//! `AppError` unifies the failures raised while ingesting media. Public
//! ingestion operations never return it to callers; they log it at the level
//! given by [`ErrorMetadata::log_level`] and report a boolean or absent result.

/// Severity an error is logged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected rejections (policy, identifiers). Only logged outside production.
    Debug,
    /// Upstream problems such as an expired remote link.
    Warn,
    /// Storage and internal failures.
    Error,
}

/// How an ingestion failure is reported.
pub trait ErrorMetadata {
    /// Stable code for log queries, e.g. `POLICY_VIOLATION`.
    fn error_code(&self) -> &'static str;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Media policy violation: {0}")]
    PolicyViolation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Remote fetch failed: {0}")]
    RemoteFetch(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (&'static str, LogLevel) {
    match err {
        AppError::Storage(_) => ("STORAGE_ERROR", LogLevel::Error),
        AppError::InvalidInput(_) => ("INVALID_INPUT", LogLevel::Debug),
        AppError::PolicyViolation(_) => ("POLICY_VIOLATION", LogLevel::Debug),
        AppError::UnsupportedMediaType(_) => ("UNSUPPORTED_MEDIA_TYPE", LogLevel::Warn),
        AppError::RemoteFetch(_) => ("REMOTE_FETCH_ERROR", LogLevel::Warn),
        AppError::Internal(_) => ("INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_storage() {
        let err = AppError::Storage("bucket unreachable".to_string());
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert_eq!(err.log_level(), LogLevel::Error);
        assert_eq!(err.to_string(), "Storage error: bucket unreachable");
    }

    #[test]
    fn test_expected_rejections_log_at_debug() {
        for err in [
            AppError::PolicyViolation("File too large".to_string()),
            AppError::InvalidInput("Missing required identifier".to_string()),
        ] {
            assert_eq!(err.log_level(), LogLevel::Debug);
        }
        assert_eq!(
            AppError::PolicyViolation(String::new()).error_code(),
            "POLICY_VIOLATION"
        );
    }

    #[test]
    fn test_upstream_failures_log_at_warn() {
        let err = AppError::UnsupportedMediaType("text/html".to_string());
        assert_eq!(err.error_code(), "UNSUPPORTED_MEDIA_TYPE");
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert_eq!(
            AppError::RemoteFetch("status 410".to_string()).log_level(),
            LogLevel::Warn
        );
    }
}
