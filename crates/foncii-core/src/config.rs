//! Configuration module
//!
//! Media configuration is read from the environment (and a `.env` file when
//! present): storage backend selection, the bucket domain that prefixes every
//! storage path, the CDN origin used for permalinks, and remote fetch limits.

use std::env;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_BUCKET_DOMAIN, DEFAULT_FONCII_CDN_ORIGIN, DEFAULT_GOOGLE_PLACES_PHOTO_PATH,
    DEFAULT_YELP_CDN_ORIGIN,
};
use crate::resize_url::ProviderOrigins;
use crate::storage_types::StorageBackend;

const REMOTE_FETCH_TIMEOUT_SECS: u64 = 60;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" | "pretty" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Media ingestion configuration
#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub environment: String,
    pub log_format: LogFormat,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub bucket_domain: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers such as MinIO.
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Delivery
    pub cdn_origin: String,
    pub google_places_photo_path: String,
    pub yelp_cdn_origin: String,
    // Remote downloads
    pub remote_fetch_timeout_secs: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_format: LogFormat::Plain,
            storage_backend: StorageBackend::Local,
            bucket_domain: DEFAULT_BUCKET_DOMAIN.to_string(),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
            local_storage_base_url: None,
            cdn_origin: DEFAULT_FONCII_CDN_ORIGIN.to_string(),
            google_places_photo_path: DEFAULT_GOOGLE_PLACES_PHOTO_PATH.to_string(),
            yelp_cdn_origin: DEFAULT_YELP_CDN_ORIGIN.to_string(),
            remote_fetch_timeout_secs: REMOTE_FETCH_TIMEOUT_SECS,
        }
    }
}

impl MediaConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.storage_backend,
        };

        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.log_format,
        };

        let config = Self {
            environment,
            log_format,
            storage_backend,
            bucket_domain: non_empty_var("STORAGE_BUCKET_DOMAIN").unwrap_or(defaults.bucket_domain),
            s3_bucket: non_empty_var("S3_BUCKET"),
            s3_region: non_empty_var("S3_REGION").or_else(|| non_empty_var("AWS_REGION")),
            s3_endpoint: non_empty_var("S3_ENDPOINT"),
            local_storage_path: non_empty_var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: non_empty_var("LOCAL_STORAGE_BASE_URL"),
            cdn_origin: non_empty_var("MEDIA_CDN_ORIGIN").unwrap_or(defaults.cdn_origin),
            google_places_photo_path: non_empty_var("GOOGLE_PLACES_PHOTO_PATH")
                .unwrap_or(defaults.google_places_photo_path),
            yelp_cdn_origin: non_empty_var("YELP_CDN_ORIGIN").unwrap_or(defaults.yelp_cdn_origin),
            remote_fetch_timeout_secs: env::var("REMOTE_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.remote_fetch_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.bucket_domain.trim().is_empty() || self.bucket_domain.contains('/') {
            return Err(anyhow::anyhow!(
                "STORAGE_BUCKET_DOMAIN must be a bare domain, got '{}'",
                self.bucket_domain
            ));
        }

        if !(self.cdn_origin.starts_with("https://") || self.cdn_origin.starts_with("http://"))
            || !self.cdn_origin.ends_with('/')
        {
            return Err(anyhow::anyhow!(
                "MEDIA_CDN_ORIGIN must be an http(s) origin ending with '/', got '{}'",
                self.cdn_origin
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!("S3_BUCKET must be set for the s3 backend"));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set for the s3 backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set for the local backend"
                    ));
                }
            }
        }

        if self.remote_fetch_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REMOTE_FETCH_TIMEOUT_SECS must be positive"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Origins recognized by the resize URL rewriter.
    pub fn provider_origins(&self) -> ProviderOrigins {
        ProviderOrigins {
            foncii_cdn: self.cdn_origin.clone(),
            google_places: self.google_places_photo_path.clone(),
            yelp_cdn: self.yelp_cdn_origin.clone(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
