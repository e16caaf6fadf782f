//! Remote document fetching port.
//!
//! Fetching is an external concern: the browser only needs "give me the body
//! behind this URL". [`StaticFetcher`] serves bodies from memory for tests and
//! headless rendering; [`HttpFetcher`] (feature `http`) goes over the network.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use url::Url;

use crate::{Error, Result};

/// Contract for retrieving the textual body of a remote document.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches the document at `location`.
    ///
    /// Implementors report unreachable documents as [`Error::FetchFailure`]
    /// and never retry.
    async fn fetch(&self, location: &Url) -> Result<String>;
}

/// Serves pre-registered document bodies keyed by URL.
#[derive(Default)]
pub struct StaticFetcher {
    documents: BTreeMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` under `location`.
    #[must_use]
    pub fn with_document(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(location, body);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, body: impl Into<String>) {
        self.documents.insert(location.into(), body.into());
    }

    /// Locations requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, location: &Url) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(location.to_string());
        }
        self.documents
            .get(location.as_str())
            .cloned()
            .ok_or_else(|| Error::fetch(location.as_str(), "document is not registered"))
    }
}

/// Fetches documents over HTTP(S).
#[cfg(feature = "http")]
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, location: &Url) -> Result<String> {
        let response = self
            .client
            .get(location.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| Error::fetch(location.as_str(), err))?;
        response
            .text()
            .await
            .map_err(|err| Error::fetch(location.as_str(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_documents_and_records_requests() {
        let fetcher = StaticFetcher::new().with_document("https://example.org/a.json", "{}");
        let url = Url::parse("https://example.org/a.json").expect("valid url");

        let body = fetcher.fetch(&url).await.expect("registered document");
        assert_eq!(body, "{}");
        assert_eq!(fetcher.requests(), vec!["https://example.org/a.json"]);
    }

    #[tokio::test]
    async fn unknown_locations_are_fetch_failures() {
        let fetcher = StaticFetcher::new();
        let url = Url::parse("https://example.org/missing.json").expect("valid url");

        let err = fetcher.fetch(&url).await.expect_err("unregistered");
        assert!(matches!(err, Error::FetchFailure { location, .. } if location == url.as_str()));
    }
}
