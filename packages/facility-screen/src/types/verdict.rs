//! Sales-eligibility verdicts.

use serde::Serialize;
use std::fmt;

/// Why a facility was (or wasn't) marked as a sales target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    ExcludedPrefecture,
    RemoteIsland,
    NoOfficialSite,
    LowQualitySite,
    AdequateOfficialSite,
    /// Screening failed for this row.
    Unknown,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExcludedPrefecture => "excluded prefecture",
            Self::RemoteIsland => "remote island",
            Self::NoOfficialSite => "no official site",
            Self::LowQualitySite => "low-quality site",
            Self::AdequateOfficialSite => "has adequate official site",
            Self::Unknown => "unknown",
        }
    }

    /// Label used in exported spreadsheets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExcludedPrefecture => "除外対象の都道府県",
            Self::RemoteIsland => "離島のため除外",
            Self::NoOfficialSite => "公式HPなし",
            Self::LowQualitySite => "簡易HP使用",
            Self::AdequateOfficialSite => "公式HPあり",
            Self::Unknown => "判定不能",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final decision for one facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub facility_name: String,
    /// Website the decision was based on; empty when excluded or absent.
    pub resolved_website: String,
    pub is_target: bool,
    /// Prefecture found in the address, empty when none matched.
    pub prefecture: String,
    pub reason: ReasonCode,
}

impl Verdict {
    /// Placeholder recorded for a row whose screening failed.
    pub fn unknown(facility_name: impl Into<String>) -> Self {
        Self {
            facility_name: facility_name.into(),
            resolved_website: String::new(),
            is_target: false,
            prefecture: String::new(),
            reason: ReasonCode::Unknown,
        }
    }
}
