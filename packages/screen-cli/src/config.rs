use anyhow::{Context, Result};
use clap::ValueEnum;
use dotenvy::dotenv;
use facility_screen::{security::ApiKey, ConfigError};
use std::env;
use std::time::Duration;

/// Which search backend to screen with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    Brave,
    Serpapi,
}

impl ProviderKind {
    /// Environment variable holding this backend's API key.
    pub fn key_var(self) -> &'static str {
        match self {
            Self::Brave => "BRAVE_API_KEY",
            Self::Serpapi => "SERPAPI_KEY",
        }
    }
}

/// Run settings loaded from environment variables.
///
/// Everything is optional here; command-line flags override these values and
/// the library supplies defaults for whatever is still unset.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub brave_api_key: Option<ApiKey>,
    pub serpapi_key: Option<ApiKey>,
    pub call_delay: Option<Duration>,
    pub call_timeout: Option<Duration>,
    pub max_rows: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            brave_api_key: secret_var(ProviderKind::Brave.key_var()),
            serpapi_key: secret_var(ProviderKind::Serpapi.key_var()),
            call_delay: env::var("SCREEN_DELAY_SECS")
                .ok()
                .map(|raw| parse_secs(&raw))
                .transpose()
                .context("SCREEN_DELAY_SECS must be a non-negative number of seconds")?,
            call_timeout: env::var("SCREEN_TIMEOUT_SECS")
                .ok()
                .map(|raw| parse_secs(&raw))
                .transpose()
                .context("SCREEN_TIMEOUT_SECS must be a non-negative number of seconds")?,
            max_rows: env::var("SCREEN_LIMIT")
                .ok()
                .map(|raw| raw.trim().parse::<usize>())
                .transpose()
                .context("SCREEN_LIMIT must be a valid number")?,
        })
    }

    /// API key for the chosen backend.
    pub fn api_key(&self, provider: ProviderKind) -> Result<ApiKey, ConfigError> {
        let key = match provider {
            ProviderKind::Brave => &self.brave_api_key,
            ProviderKind::Serpapi => &self.serpapi_key,
        };
        key.clone()
            .ok_or_else(|| ConfigError::MissingCredential(provider.key_var().to_string()))
    }
}

fn secret_var(name: &str) -> Option<ApiKey> {
    env::var(name).ok().and_then(|raw| ApiKey::parse(&raw))
}

/// Parse a seconds value such as `1` or `0.5`.
pub fn parse_secs(raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("not a number: {raw:?}"))?;
    Duration::try_from_secs_f64(secs).with_context(|| format!("not a valid duration: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secs() {
        assert_eq!(parse_secs("1").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_secs(" 0.5 ").unwrap(), Duration::from_millis(500));
        assert!(parse_secs("-1").is_err());
        assert!(parse_secs("soon").is_err());
    }

    #[test]
    fn test_missing_key_names_variable() {
        let config = Config {
            brave_api_key: ApiKey::parse("brave-key"),
            ..Default::default()
        };

        assert_eq!(
            config.api_key(ProviderKind::Brave).unwrap().expose(),
            "brave-key"
        );
        let err = config.api_key(ProviderKind::Serpapi).unwrap_err();
        assert_eq!(err.to_string(), "missing credential: SERPAPI_KEY");
    }
}
