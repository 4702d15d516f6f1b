//! Brave Web Search API backend.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{http_client, transport_error, DEFAULT_HTTP_TIMEOUT, DEFAULT_RESULT_COUNT};
use crate::error::{LookupError, LookupResult};
use crate::security::ApiKey;
use crate::traits::LookupProvider;
use crate::types::SearchHit;

const SEARCH_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

pub struct BraveSearchProvider {
    client: reqwest::Client,
    api_key: ApiKey,
    count: usize,
}

impl BraveSearchProvider {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            client: http_client(DEFAULT_HTTP_TIMEOUT),
            api_key,
            count: DEFAULT_RESULT_COUNT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// A missing `web` section means Brave had nothing for the query.
fn hits_from_body(body: &str) -> LookupResult<Vec<SearchHit>> {
    let response: BraveResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    Ok(response
        .web
        .map(|web| web.results)
        .unwrap_or_default()
        .into_iter()
        .map(|r| SearchHit {
            url: r.url,
            title: r.title,
            description: r.description,
        })
        .collect())
}

#[async_trait]
impl LookupProvider for BraveSearchProvider {
    async fn search(&self, query: &str) -> LookupResult<Vec<SearchHit>> {
        let count = self.count.to_string();
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", self.api_key.expose())
            .query(&[("q", query), ("count", count.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(e, query))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, query))?;
        hits_from_body(&body)
    }

    fn name(&self) -> &'static str {
        "brave"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results() {
        let body = r#"{
            "type": "search",
            "web": {
                "results": [
                    {"url": "https://yashiro.jp/", "title": "やしろ旅館【公式】", "description": "長野県松本市..."},
                    {"url": "https://www.jalan.net/yad1/", "title": "やしろ旅館 - じゃらん"}
                ]
            }
        }"#;
        let hits = hits_from_body(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://yashiro.jp/");
        assert_eq!(hits[1].description, "");
    }

    #[test]
    fn test_missing_web_section_is_empty() {
        assert!(hits_from_body(r#"{"type": "search"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            hits_from_body("<html>rate limited</html>"),
            Err(LookupError::Decode(_))
        ));
    }

    // Requires a real Brave API key
    #[tokio::test]
    #[ignore]
    async fn test_brave_search_live() {
        let api_key = std::env::var("BRAVE_API_KEY").expect("BRAVE_API_KEY required");
        let api_key = ApiKey::parse(&api_key).expect("BRAVE_API_KEY is blank");
        let provider = BraveSearchProvider::new(api_key);
        let hits = provider.search("帝国ホテル 公式サイト").await.unwrap();
        assert!(!hits.is_empty());
    }
}
