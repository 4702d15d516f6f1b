//! API key handling and URL safety checks.

pub mod api_key;
pub mod url_guard;

pub use api_key::ApiKey;
pub use url_guard::UrlGuard;
