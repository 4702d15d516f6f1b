//! HTTP page fetcher for the technology probe.
//!
//! Every redirect hop goes through the same `UrlGuard` check as the first
//! URL, so a public site can't bounce the probe onto a private address.

use async_trait::async_trait;
use reqwest::redirect;
use std::time::Duration;
use tracing::debug;

use super::DEFAULT_HTTP_TIMEOUT;
use crate::error::{FetchError, FetchResult, SecurityError, SecurityResult};
use crate::security::UrlGuard;
use crate::traits::PageFetcher;

/// Some builders serve an empty shell to unknown agents.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

const MAX_REDIRECTS: usize = 5;

pub struct HttpPageFetcher {
    client: reqwest::Client,
    guard: UrlGuard,
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        let guard = UrlGuard::new();
        Self {
            client: guarded_client(DEFAULT_HTTP_TIMEOUT, &guard),
            guard,
            timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = guarded_client(timeout, &self.guard);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_guard(mut self, guard: UrlGuard) -> Self {
        self.client = guarded_client(self.timeout, &guard);
        self.guard = guard;
        self
    }
}

fn guarded_client(timeout: Duration, guard: &UrlGuard) -> reqwest::Client {
    let guard = guard.clone();
    let policy = redirect::Policy::custom(move |attempt| {
        match check_redirect(&guard, attempt.url().as_str(), attempt.previous().len()) {
            Ok(()) => attempt.follow(),
            Err(e) => attempt.error(e),
        }
    });

    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(policy)
        .build()
        .unwrap_or_default()
}

/// Whether a redirect to `next` may be followed after `hops` earlier URLs.
fn check_redirect(guard: &UrlGuard, next: &str, hops: usize) -> SecurityResult<()> {
    if hops > MAX_REDIRECTS {
        return Err(SecurityError::TooManyRedirects(hops));
    }
    guard.check(next)
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.guard.check(url)?;

        debug!(url = %url, "Fetching page for technology probe");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsafe_url_rejected_without_request() {
        let fetcher = HttpPageFetcher::new();
        assert!(matches!(
            fetcher.fetch("http://127.0.0.1:9/").await,
            Err(FetchError::Unsafe(_))
        ));
        assert!(matches!(
            fetcher.fetch("ftp://yashiro.jp/").await,
            Err(FetchError::Unsafe(_))
        ));
    }

    #[test]
    fn test_redirect_to_private_address_refused() {
        let guard = UrlGuard::new();
        assert!(check_redirect(&guard, "https://yashiro.jp/top", 1).is_ok());
        assert!(matches!(
            check_redirect(&guard, "http://169.254.169.254/latest/meta-data/", 1),
            Err(SecurityError::BlockedCidr(_))
        ));
        assert!(matches!(
            check_redirect(&guard, "http://localhost/admin", 1),
            Err(SecurityError::BlockedHost(_))
        ));
        assert!(matches!(
            check_redirect(&guard, "file:///etc/passwd", 1),
            Err(SecurityError::DisallowedScheme(_))
        ));
    }

    #[test]
    fn test_redirect_chain_is_bounded() {
        let guard = UrlGuard::new();
        assert!(check_redirect(&guard, "https://yashiro.jp/", MAX_REDIRECTS).is_ok());
        assert!(matches!(
            check_redirect(&guard, "https://yashiro.jp/", MAX_REDIRECTS + 1),
            Err(SecurityError::TooManyRedirects(_))
        ));
    }
}
