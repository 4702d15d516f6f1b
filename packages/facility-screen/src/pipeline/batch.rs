//! Batch runner: every input row in, exactly one output row out.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info};

use super::judge::EligibilityJudge;
use super::orchestrate::Orchestrator;
use crate::error::{ConfigError, Result, ScreenError};
use crate::traits::{LookupProvider, PageFetcher};
use crate::types::{
    BatchOutcome, ClassificationResult, FacilityRecord, Progress, ReferenceTables, ScreenConfig,
    ScreenMode, ScreenedRow, Verdict,
};

pub struct BatchRunner<P: LookupProvider, F: PageFetcher> {
    orchestrator: Orchestrator<P>,
    judge: EligibilityJudge<F>,
    config: ScreenConfig,
}

impl<P: LookupProvider, F: PageFetcher> BatchRunner<P, F> {
    pub fn new(
        provider: P,
        fetcher: F,
        tables: Arc<ReferenceTables>,
        config: ScreenConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            orchestrator: Orchestrator::new(provider, tables.clone(), &config)?,
            judge: EligibilityJudge::new(fetcher, tables, config.call_timeout),
            config,
        })
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Screen facilities in order, calling `on_progress` after each row.
    ///
    /// Rows beyond `max_rows` are not processed. Every processed row yields
    /// exactly one output row at the same index; failures become unknown rows.
    pub async fn run<G>(&self, facilities: &[FacilityRecord], mut on_progress: G) -> BatchOutcome
    where
        G: FnMut(Progress<'_>),
    {
        let limit = self
            .config
            .max_rows
            .map_or(facilities.len(), |max| max.min(facilities.len()));
        let selected = &facilities[..limit];
        let total = selected.len();

        info!(total, mode = ?self.config.mode, "Starting batch");

        let mut outcome = Vec::with_capacity(total);
        for (idx, facility) in selected.iter().enumerate() {
            info!(facility = %facility.name, row = idx + 1, total, "Screening facility");

            let row = match self.screen_isolated(facility).await {
                Ok(row) => row,
                Err(e) => {
                    error!(facility = %facility.name, row = idx + 1, error = %e, "Screening failed, recording unknown row");
                    self.failed_row(facility, &e)
                }
            };
            outcome.push(row);

            on_progress(Progress {
                processed: idx + 1,
                total,
                facility: &facility.name,
            });
        }

        info!(total, "Batch finished");
        outcome
    }

    /// Screen one facility: lookups, then the verdict in eligibility mode.
    pub async fn screen(&self, facility: &FacilityRecord) -> Result<ScreenedRow> {
        let name = facility.name.trim();
        if name.is_empty() {
            return Err(ScreenError::EmptyFacilityName);
        }

        let sites = self.orchestrator.resolve(name).await;

        let verdict = match self.config.mode {
            ScreenMode::Sites => None,
            ScreenMode::Eligibility => {
                let website = sites
                    .official_site
                    .as_deref()
                    .or(facility.known_website.as_deref())
                    .unwrap_or_default();
                let address = facility
                    .known_address
                    .as_deref()
                    .or(sites.address_hint.as_deref())
                    .unwrap_or_default();
                Some(self.judge.judge(name, website, address).await)
            }
        };

        Ok(ScreenedRow {
            facility: facility.clone(),
            sites,
            verdict,
            error: None,
        })
    }

    /// `screen`, with panics from collaborators turned into errors.
    async fn screen_isolated(&self, facility: &FacilityRecord) -> Result<ScreenedRow> {
        AssertUnwindSafe(self.screen(facility))
            .catch_unwind()
            .await
            .map_err(|payload| ScreenError::Panicked(panic_message(payload.as_ref())))?
    }

    fn failed_row(&self, facility: &FacilityRecord, err: &ScreenError) -> ScreenedRow {
        let verdict = match self.config.mode {
            ScreenMode::Sites => None,
            ScreenMode::Eligibility => Some(Verdict::unknown(facility.name.clone())),
        };
        ScreenedRow {
            facility: facility.clone(),
            sites: ClassificationResult::new(),
            verdict,
            error: Some(err.to_string()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
