use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use foncii_services::{FetchError, RemoteFetcher, RemoteMedia};

/// Fetcher answering from canned responses. Unknown URLs return a 404.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Result<RemoteMedia, u16>>,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serving(mut self, url: &str, content_type: &str, data: Bytes) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(RemoteMedia {
                content_type: content_type.to_string(),
                data,
            }),
        );
        self
    }

    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Err(status));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<RemoteMedia, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(media)) => Ok(media.clone()),
            Some(Err(status)) => Err(FetchError::Status(*status)),
            None => Err(FetchError::Status(404)),
        }
    }
}
