//! Batch results, progress events and summary counts.

use serde::Serialize;

use super::{ClassificationResult, FacilityRecord, Verdict};

/// Screening result for one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenedRow {
    pub facility: FacilityRecord,
    pub sites: ClassificationResult,
    /// Present in eligibility mode only.
    pub verdict: Option<Verdict>,
    /// Set when screening this row failed; the row is then empty/unknown.
    pub error: Option<String>,
}

impl ScreenedRow {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// One row per processed input row, in input order.
pub type BatchOutcome = Vec<ScreenedRow>;

/// Emitted after each row is screened.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub processed: usize,
    pub total: usize,
    pub facility: &'a str,
}

/// Counts shown once a batch finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub failed: usize,
    pub with_official_site: usize,
    pub with_ota_listing: usize,
    pub without_any_site: usize,
    /// Eligibility mode only.
    pub targets: usize,
    /// Eligibility mode only.
    pub non_targets: usize,
}

impl BatchSummary {
    pub fn from_outcome(outcome: &[ScreenedRow]) -> Self {
        let mut summary = Self {
            total: outcome.len(),
            ..Default::default()
        };

        for row in outcome {
            if row.is_failed() {
                summary.failed += 1;
            }
            let has_official = row.sites.has_official_site();
            let has_ota = !row.sites.ota_sites.is_empty();
            if has_official {
                summary.with_official_site += 1;
            }
            if has_ota {
                summary.with_ota_listing += 1;
            }
            if !has_official && !has_ota {
                summary.without_any_site += 1;
            }
            match &row.verdict {
                Some(v) if v.is_target => summary.targets += 1,
                Some(_) => summary.non_targets += 1,
                None => {}
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReasonCode;

    fn row(official: Option<&str>, ota: &[&str], target: Option<bool>) -> ScreenedRow {
        let mut sites = ClassificationResult::new();
        sites.official_site = official.map(String::from);
        sites.ota_sites.extend(ota.iter().map(|s| s.to_string()));
        ScreenedRow {
            facility: FacilityRecord::new("x"),
            sites,
            verdict: target.map(|is_target| Verdict {
                facility_name: "x".into(),
                resolved_website: String::new(),
                is_target,
                prefecture: String::new(),
                reason: ReasonCode::NoOfficialSite,
            }),
            error: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut failed = row(None, &[], Some(false));
        failed.error = Some("boom".into());

        let outcome = vec![
            row(Some("https://a.jp"), &["https://booking.com/a"], Some(false)),
            row(None, &["https://www.jalan.net/b"], Some(true)),
            row(None, &[], Some(true)),
            failed,
        ];

        let summary = BatchSummary::from_outcome(&outcome);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.with_official_site, 1);
        assert_eq!(summary.with_ota_listing, 2);
        assert_eq!(summary.without_any_site, 2);
        assert_eq!(summary.targets, 2);
        assert_eq!(summary.non_targets, 2);
    }

    #[test]
    fn test_sites_mode_has_no_verdict_counts() {
        let summary = BatchSummary::from_outcome(&[row(None, &[], None)]);
        assert_eq!(summary.targets, 0);
        assert_eq!(summary.non_targets, 0);
        assert_eq!(summary.without_any_site, 1);
    }
}
