//! Mock collaborators for tests.
//!
//! Both mocks share their state across clones, so a test can hand one clone
//! to the pipeline and inspect the recorded calls through another.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{FetchError, FetchResult, LookupError, LookupResult};
use crate::traits::{LookupProvider, PageFetcher};
use crate::types::SearchHit;

/// Lookup provider returning canned hits per exact query string.
///
/// Unknown queries return no hits.
#[derive(Clone, Default)]
pub struct MockLookupProvider {
    hits: Arc<RwLock<HashMap<String, Vec<SearchHit>>>>,
    failing_queries: Arc<RwLock<HashSet<String>>>,
    panicking_queries: Arc<RwLock<HashSet<String>>>,
    fail_all: bool,
    delay: Option<Duration>,
    queries: Arc<RwLock<Vec<String>>>,
}

impl MockLookupProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned hits for a query.
    pub fn with_hits(self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.hits.write().unwrap().insert(query.into(), hits);
        self
    }

    /// Make one query fail with an API error.
    pub fn fail_query(self, query: impl Into<String>) -> Self {
        self.failing_queries.write().unwrap().insert(query.into());
        self
    }

    /// Make one query panic inside the provider.
    pub fn panic_on(self, query: impl Into<String>) -> Self {
        self.panicking_queries.write().unwrap().insert(query.into());
        self
    }

    /// Fail every query.
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Sleep before answering, to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every query received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl LookupProvider for MockLookupProvider {
    async fn search(&self, query: &str) -> LookupResult<Vec<SearchHit>> {
        self.queries.write().unwrap().push(query.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let should_panic = self.panicking_queries.read().unwrap().contains(query);
        if should_panic {
            panic!("mock provider exploded on {query}");
        }

        let should_fail = self.fail_all || self.failing_queries.read().unwrap().contains(query);
        if should_fail {
            return Err(LookupError::Api {
                status: 429,
                message: "mock quota exceeded".to_string(),
            });
        }

        Ok(self
            .hits
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Page fetcher returning canned bodies per exact URL.
///
/// Unknown URLs fail with a 404.
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failing_urls: Arc<RwLock<HashSet<String>>>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), body.into());
        self
    }

    /// Make a URL fail with a connection error.
    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.failing_urls.write().unwrap().insert(url.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every URL fetched, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_urls.read().unwrap().contains(url) {
            return Err(FetchError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Mock connection refused",
            ))));
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
