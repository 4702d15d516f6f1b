//! Page body fetch used by the technology probe.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::FetchResult;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw body of `url`.
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        (**self).fetch(url).await
    }
}
