#![allow(dead_code)]

pub mod fetcher;
pub mod fixtures;
pub mod storage;

use std::sync::Arc;

use foncii_services::MediaIngestionGateway;

use self::fetcher::StubFetcher;
use self::storage::MemoryStorage;

pub const BUCKET: &str = "foncii-media.appspot.com";
pub const CDN: &str = "https://cdn.foncii.com/";

/// Gateway wired to in-memory collaborators
pub struct TestGateway {
    pub gateway: MediaIngestionGateway,
    pub storage: Arc<MemoryStorage>,
    pub fetcher: Arc<StubFetcher>,
}

pub fn setup_gateway() -> TestGateway {
    setup_gateway_with(MemoryStorage::new(), StubFetcher::new())
}

pub fn setup_gateway_with(storage: MemoryStorage, fetcher: StubFetcher) -> TestGateway {
    let storage = Arc::new(storage);
    let fetcher = Arc::new(fetcher);
    let gateway = MediaIngestionGateway::new(storage.clone(), fetcher.clone(), BUCKET, CDN);
    TestGateway {
        gateway,
        storage,
        fetcher,
    }
}

/// Decode a permalink back to the storage path it encodes.
pub fn decode_permalink(link: &str) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    let encoded = link
        .strip_prefix(CDN)
        .unwrap_or_else(|| panic!("permalink {} does not start with {}", link, CDN));
    String::from_utf8(URL_SAFE_NO_PAD.decode(encoded).unwrap()).unwrap()
}
