//! SerpAPI backend (Google engine, Japanese locale).
//!
//! Organic results become hits in rank order. A Google local/Maps listing, when
//! present, is put first: its website as the URL and its address as the
//! description, so the address is picked up even when the listing has no
//! website.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{http_client, transport_error, DEFAULT_HTTP_TIMEOUT, DEFAULT_RESULT_COUNT};
use crate::error::{LookupError, LookupResult};
use crate::security::ApiKey;
use crate::traits::LookupProvider;
use crate::types::SearchHit;

const SEARCH_ENDPOINT: &str = "https://serpapi.com/search.json";

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    local_results: Option<LocalResults>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

/// Google returns local results either as a bare list or wrapped in `places`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocalResults {
    List(Vec<LocalPlace>),
    Wrapped { places: Vec<LocalPlace> },
}

#[derive(Debug, Deserialize)]
struct LocalPlace {
    #[serde(default)]
    title: String,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

impl LocalResults {
    fn first(self) -> Option<LocalPlace> {
        match self {
            Self::List(places) | Self::Wrapped { places } => places.into_iter().next(),
        }
    }
}

pub struct SerpApiProvider {
    client: reqwest::Client,
    api_key: ApiKey,
    count: usize,
}

impl SerpApiProvider {
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

fn hits_from_body(body: &str) -> LookupResult<Vec<SearchHit>> {
    let response: SerpResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    if let Some(error) = response.error {
        if response.organic_results.is_empty() {
            return Err(LookupError::Api {
                status: 200,
                message: error,
            });
        }
    }

    let mut hits = Vec::with_capacity(response.organic_results.len() + 1);

    if let Some(place) = response.local_results.and_then(LocalResults::first) {
        hits.push(SearchHit {
            url: place.website.unwrap_or_default(),
            title: place.title,
            description: place.address.unwrap_or_default(),
        });
    }

    hits.extend(response.organic_results.into_iter().map(|r| SearchHit {
        url: r.link,
        title: r.title,
        description: r.snippet,
    }));

    Ok(hits)
}

#[async_trait]
impl LookupProvider for SerpApiProvider {
    async fn search(&self, query: &str) -> LookupResult<Vec<SearchHit>> {
        let num = self.count.to_string();
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.expose()),
                ("hl", "ja"),
                ("gl", "jp"),
                ("location", "Japan"),
                ("num", num.as_str()),
            ])
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
        "serpapi"
    }
}
