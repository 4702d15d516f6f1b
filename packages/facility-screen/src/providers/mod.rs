//! Concrete collaborators: search backends and the HTTP page fetcher.

pub mod brave;
pub mod http_fetch;
pub mod serpapi;

pub use brave::BraveSearchProvider;
pub use http_fetch::HttpPageFetcher;
pub use serpapi::SerpApiProvider;

use std::time::Duration;

use crate::error::LookupError;

/// Per-request timeout for every built-in HTTP collaborator.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Results requested per query.
pub const DEFAULT_RESULT_COUNT: usize = 10;

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Request URLs are dropped from transport errors; SerpAPI carries its key there.
pub(crate) fn transport_error(e: reqwest::Error, query: &str) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout {
            query: query.to_string(),
        }
    } else {
        LookupError::Http(Box::new(e.without_url()))
    }
}
