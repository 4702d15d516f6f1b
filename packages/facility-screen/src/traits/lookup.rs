//! Search provider trait.
//!
//! The pipeline only needs "query in, ranked hits out". Brave, SerpAPI and the
//! test mock all sit behind this trait, so the extraction and judging logic is
//! written once regardless of backend.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::LookupResult;
use crate::types::SearchHit;

/// Web search backend.
///
/// # Implementations
///
/// - `BraveSearchProvider` - Brave Web Search API
/// - `SerpApiProvider` - SerpAPI (Google engine)
/// - `MockLookupProvider` - For testing
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Run one query. Failures are expected (quota, auth, network) and the
    /// caller treats them as "no hits".
    async fn search(&self, query: &str) -> LookupResult<Vec<SearchHit>>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str {
        "lookup"
    }
}

#[async_trait]
impl<T: LookupProvider + ?Sized> LookupProvider for Arc<T> {
    async fn search(&self, query: &str) -> LookupResult<Vec<SearchHit>> {
        (**self).search(query).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
