//! URL → domain bucket.

use url::Url;

use crate::types::ReferenceTables;

/// Which bucket a search hit's host falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainClass {
    /// Third-party booking platform.
    Ota,
    /// Social media, aggregators and other non-target domains.
    Excluded,
    /// Anything else; may still turn out to be the official site.
    Unrestricted,
}

/// Host of `url`: lower-cased, without scheme, port or a leading `www.`.
///
/// Internationalized hosts come back in Unicode (`やしろ旅館.jp`, not the
/// `xn--` form) so facility names can be found in them. Scheme-less input (`example.jp/path`) is read as http. Anything that still
/// fails to parse yields an empty host.
pub fn extract_host(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let parsed = match Url::parse(trimmed) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(&format!("http://{trimmed}")) {
                Ok(parsed) => parsed,
                Err(_) => return String::new(),
            }
        }
        Err(_) => return String::new(),
    };

    let Some(host) = parsed.host_str() else {
        return String::new();
    };

    let (unicode, result) = idna::domain_to_unicode(host);
    let host = match result {
        Ok(()) => unicode.to_lowercase(),
        Err(_) => host.to_lowercase(),
    };
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

/// Classify a URL. Excluded takes precedence over OTA.
pub fn classify(url: &str, tables: &ReferenceTables) -> DomainClass {
    classify_host(&extract_host(url), tables)
}

/// Classify an already-extracted host.
pub fn classify_host(host: &str, tables: &ReferenceTables) -> DomainClass {
    if host.is_empty() {
        return DomainClass::Unrestricted;
    }
    if contains_any(host, &tables.excluded_domains) {
        DomainClass::Excluded
    } else if contains_any(host, &tables.ota_domains) {
        DomainClass::Ota
    } else {
        DomainClass::Unrestricted
    }
}

/// Substring match against a table. Empty entries never match.
pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && haystack.contains(needle.as_str()))
}
