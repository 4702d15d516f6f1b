//! Search hits → official site + OTA listings.
//!
//! One pass over the hits in rank order:
//!
//! 1. empty URLs and excluded domains are dropped
//! 2. OTA hits go into the OTA set and never compete for official site
//! 3. anything else becomes the official site if it carries an "official"
//!    marker in its title/snippet, or the start of the facility name shows up
//!    in its host
//!
//! The first accepted hit wins; later hits are still scanned for OTA listings.

use std::sync::Arc;

use super::classify::{classify_host, extract_host, DomainClass};
use crate::types::{ClassificationResult, OfficialPolicy, ReferenceTables, SearchHit};

/// Leading characters of the facility name compared against hosts.
const NAME_KEY_MAX_CHARS: usize = 5;

/// Shorter keys match too many unrelated hosts.
const NAME_KEY_MIN_CHARS: usize = 3;

#[derive(Debug, Clone)]
pub struct EvidenceExtractor {
    tables: Arc<ReferenceTables>,
    policy: OfficialPolicy,
}

impl EvidenceExtractor {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self {
            tables,
            policy: OfficialPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: OfficialPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn extract(&self, hits: &[SearchHit], facility_name: &str) -> ClassificationResult {
        let name_keys = name_keys(facility_name, &self.tables.lodging_words);
        let mut result = ClassificationResult::new();

        for hit in hits {
            if hit.url.trim().is_empty() {
                continue;
            }

            let host = extract_host(&hit.url);
            match classify_host(&host, &self.tables) {
                DomainClass::Excluded => continue,
                DomainClass::Ota => {
                    result.ota_sites.insert(hit.url.clone());
                    continue;
                }
                DomainClass::Unrestricted => {}
            }

            if result.official_site.is_none() && self.is_official(hit, &host, &name_keys) {
                tracing::trace!(url = %hit.url, facility = %facility_name, "Accepted official site");
                result.official_site = Some(hit.url.clone());
            }
        }

        result
    }

    fn is_official(&self, hit: &SearchHit, host: &str, name_keys: &[String]) -> bool {
        let text = format!("{} {}", hit.title, hit.description).to_lowercase();
        let keyword = self
            .tables
            .official_markers
            .iter()
            .any(|marker| !marker.is_empty() && text.contains(&marker.to_lowercase()));

        let name_match =
            !host.is_empty() && name_keys.iter().any(|key| host.contains(key.as_str()));

        match self.policy {
            OfficialPolicy::AnySignal => keyword || name_match,
            OfficialPolicy::AllSignals => keyword && name_match,
        }
    }
}

/// Keys derived from the facility name for host matching.
///
/// Both the plain name and the name without generic lodging words are tried,
/// each cut to its first five characters. Keys under three characters are
/// dropped.
pub fn name_keys(facility_name: &str, lodging_words: &[String]) -> Vec<String> {
    let compact: String = facility_name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let stripped = lodging_words
        .iter()
        .filter(|word| !word.is_empty())
        .fold(compact.clone(), |name, word| {
            name.replace(&word.to_lowercase(), "")
        });

    let mut keys: Vec<String> = Vec::with_capacity(2);
    for candidate in [compact, stripped] {
        let key: String = candidate.chars().take(NAME_KEY_MAX_CHARS).collect();
        if key.chars().count() >= NAME_KEY_MIN_CHARS && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
