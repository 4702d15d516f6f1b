//! Search API keys.
//!
//! A key comes from `.env`, the environment or `--api-key` and ends up in a
//! request header (Brave) or query string (SerpAPI). Logs only ever see a
//! masked hint with the last four characters.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

const HINT_CHARS: usize = 4;

/// Keys this short are masked entirely.
const MIN_HINTED_LEN: usize = 12;

pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    /// Trimmed key, or `None` for an empty/whitespace value.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(SecretBox::new(Box::from(trimmed))))
    }

    /// The raw key, for building the provider request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// `****` plus the last few characters, so runs can be told apart in logs.
    pub fn hint(&self) -> String {
        let key = self.expose();
        let len = key.chars().count();
        if len < MIN_HINTED_LEN {
            return "****".to_string();
        }
        let tail: String = key.chars().skip(len - HINT_CHARS).collect();
        format!("****{tail}")
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self(SecretBox::new(Box::from(self.expose())))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.hint()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hint())
    }
}
