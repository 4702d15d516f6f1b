//! Per-facility lookup loop.
//!
//! Tries each query variant in order until one produces an official site.
//! Provider failures and timeouts count as "no hits" for that variant; OTA
//! listings from every attempt are kept.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::evidence::EvidenceExtractor;
use super::geo::find_address;
use super::pacer::Pacer;
use crate::error::ConfigError;
use crate::traits::LookupProvider;
use crate::types::{ClassificationResult, ReferenceTables, ScreenConfig, SearchHit};

pub struct Orchestrator<P: LookupProvider> {
    provider: P,
    extractor: EvidenceExtractor,
    tables: Arc<ReferenceTables>,
    pacer: Pacer,
    call_timeout: Duration,
}

impl<P: LookupProvider> Orchestrator<P> {
    pub fn new(
        provider: P,
        tables: Arc<ReferenceTables>,
        config: &ScreenConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            provider,
            extractor: EvidenceExtractor::new(tables.clone()).with_policy(config.official_policy),
            tables,
            pacer: Pacer::new(config.call_delay)?,
            call_timeout: config.call_timeout,
        })
    }

    /// Queries tried for a facility, in order.
    pub fn query_variants(&self, facility_name: &str) -> Vec<String> {
        let name = facility_name.trim();
        if self.tables.query_suffixes.is_empty() {
            return vec![name.to_string()];
        }
        self.tables
            .query_suffixes
            .iter()
            .map(|suffix| format!("{name} {suffix}").trim().to_string())
            .collect()
    }

    pub async fn resolve(&self, facility_name: &str) -> ClassificationResult {
        let mut accumulated = ClassificationResult::new();

        for query in self.query_variants(facility_name) {
            let hits = self.lookup(&query).await;

            let mut found = self.extractor.extract(&hits, facility_name);
            found.address_hint = find_address(&hits, &self.tables.prefectures);
            let resolved = found.has_official_site();
            accumulated.absorb(found);

            if resolved {
                debug!(
                    facility = %facility_name,
                    query = %query,
                    official_site = ?accumulated.official_site,
                    "Official site found"
                );
                return accumulated;
            }
        }

        debug!(
            facility = %facility_name,
            ota_sites = accumulated.ota_sites.len(),
            "No official site after all query variants"
        );
        accumulated
    }

    async fn lookup(&self, query: &str) -> Vec<SearchHit> {
        self.pacer.ready().await;

        let result = tokio::time::timeout(self.call_timeout, self.provider.search(query)).await;
        self.pacer.finished().await;

        match result {
            Ok(Ok(hits)) => {
                debug!(provider = self.provider.name(), query = %query, hits = hits.len(), "Search returned");
                hits
            }
            Ok(Err(e)) => {
                warn!(provider = self.provider.name(), query = %query, error = %e, "Search failed, treating as no hits");
                Vec::new()
            }
            Err(_) => {
                warn!(provider = self.provider.name(), query = %query, timeout = ?self.call_timeout, "Search timed out, treating as no hits");
                Vec::new()
            }
        }
    }
}
