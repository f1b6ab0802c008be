//! Foncii Services Library
//!
//! Media ingestion for posts and profile pictures: policy-checked uploads to
//! deterministic storage paths, deletions, and ingestion of remote media.

pub mod ingestion;
pub mod remote;

pub use ingestion::{MediaIngestionGateway, PostUpload};
pub use remote::{FetchError, HttpFetcher, RemoteFetcher, RemoteMedia};
