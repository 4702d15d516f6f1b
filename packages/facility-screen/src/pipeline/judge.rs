//! Sales-eligibility decision.
//!
//! A fixed decision tree, evaluated top to bottom; the first rule that applies
//! decides:
//!
//! | rule                                   | target | reason                  |
//! |----------------------------------------|--------|-------------------------|
//! | address in the excluded prefecture     | no     | `ExcludedPrefecture`    |
//! | address matches a remote-island keyword| no     | `RemoteIsland`          |
//! | no website                             | yes    | `NoOfficialSite`        |
//! | website built on a simple/free builder | yes    | `LowQualitySite`        |
//! | otherwise                              | no     | `AdequateOfficialSite`  |

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::classify::{contains_any, extract_host};
use super::geo::{extract_prefecture, is_remote_island};
use crate::traits::PageFetcher;
use crate::types::{ReasonCode, ReferenceTables, Verdict};

pub struct EligibilityJudge<F: PageFetcher> {
    tables: Arc<ReferenceTables>,
    fetcher: F,
    fetch_timeout: Duration,
}

impl<F: PageFetcher> EligibilityJudge<F> {
    pub fn new(fetcher: F, tables: Arc<ReferenceTables>, fetch_timeout: Duration) -> Self {
        Self {
            tables,
            fetcher,
            fetch_timeout,
        }
    }

    pub async fn judge(&self, facility_name: &str, website: &str, address: &str) -> Verdict {
        let prefecture = extract_prefecture(address, &self.tables.prefectures);
        let website = website.trim();

        let verdict = |resolved_website: &str, is_target: bool, reason: ReasonCode| Verdict {
            facility_name: facility_name.to_string(),
            resolved_website: resolved_website.to_string(),
            is_target,
            prefecture: prefecture.clone(),
            reason,
        };

        if !prefecture.is_empty() && prefecture == self.tables.excluded_prefecture {
            return verdict("", false, ReasonCode::ExcludedPrefecture);
        }

        if is_remote_island(address, &self.tables) {
            return verdict("", false, ReasonCode::RemoteIsland);
        }

        if website.is_empty() {
            return verdict("", true, ReasonCode::NoOfficialSite);
        }

        if self.is_simple_site(website).await {
            verdict(website, true, ReasonCode::LowQualitySite)
        } else {
            verdict(website, false, ReasonCode::AdequateOfficialSite)
        }
    }

    /// Whether the site was made with a free/simple builder.
    ///
    /// Hosting domain first; otherwise the page body is searched for builder
    /// fingerprints. A failed or timed-out fetch counts as "not simple".
    pub async fn is_simple_site(&self, website: &str) -> bool {
        let host = extract_host(website);
        if contains_any(&host, &self.tables.simple_site_domains) {
            debug!(website = %website, "Simple site by hosting domain");
            return true;
        }

        let body = match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(website)).await
        {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                warn!(website = %website, error = %e, "Technology probe fetch failed");
                return false;
            }
            Err(_) => {
                warn!(website = %website, timeout = ?self.fetch_timeout, "Technology probe timed out");
                return false;
            }
        };

        let simple = contains_any(&body.to_lowercase(), &self.tables.builder_fingerprints);
        debug!(website = %website, simple, "Technology probe finished");
        simple
    }
}
