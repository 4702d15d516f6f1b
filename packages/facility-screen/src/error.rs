//! Typed errors for the screening library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Most of these never
//! reach the caller: lookup and fetch failures are absorbed by the pipeline
//! and show up as degraded classifications instead.

use thiserror::Error;

/// Errors raised by a `LookupProvider`.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider answered with a non-success status (quota, auth, ...)
    #[error("search API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Call exceeded the configured timeout
    #[error("search timed out for query: {query}")]
    Timeout { query: String },

    /// Response body could not be decoded
    #[error("unexpected search response: {0}")]
    Decode(String),
}

/// Errors raised by a `PageFetcher`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL rejected before any request was made
    #[error("unsafe URL: {0}")]
    Unsafe(#[from] SecurityError),

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success HTTP status
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Call exceeded the configured timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// URL safety errors for page fetches.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in a blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// Redirect chain longer than allowed
    #[error("too many redirects ({0})")]
    TooManyRedirects(usize),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Per-facility failures, caught at the batch row boundary.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Input row had a blank facility name
    #[error("facility name is empty")]
    EmptyFacilityName,

    /// A collaborator panicked while screening the row
    #[error("screening panicked: {0}")]
    Panicked(String),
}

/// Configuration errors. The only errors that stop a run from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required API credential is missing or blank
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// Inter-call delay could not be turned into a rate limit
    #[error("invalid inter-call delay: {0:?}")]
    InvalidDelay(std::time::Duration),

    /// Per-call timeout of zero would fail every search and fetch
    #[error("invalid call timeout: {0:?}")]
    InvalidTimeout(std::time::Duration),

    /// Reference tables file could not be parsed
    #[error("invalid reference tables: {0}")]
    InvalidTables(#[from] serde_json::Error),
}

/// Result type alias for lookup operations.
pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Result type alias for page fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for security checks.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;

/// Result type alias for per-facility screening.
pub type Result<T> = std::result::Result<T, ScreenError>;
