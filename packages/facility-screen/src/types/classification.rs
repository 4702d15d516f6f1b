//! Official-site / OTA classification for one facility.

use indexmap::IndexSet;
use serde::Serialize;

/// What the lookups found for one facility.
///
/// `ota_sites` keeps first-seen order so exported rows are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// First search hit accepted as the facility's own website.
    pub official_site: Option<String>,

    /// Booking-platform listings, deduplicated by exact URL.
    pub ota_sites: IndexSet<String>,

    /// Address spotted in a result snippet, used when the input row has none.
    pub address_hint: Option<String>,
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_official_site(&self) -> bool {
        self.official_site.is_some()
    }

    /// Fold another attempt's findings into this one.
    ///
    /// OTA sites are unioned. The official site and address hint are only
    /// taken when not already set.
    pub fn absorb(&mut self, other: ClassificationResult) {
        self.ota_sites.extend(other.ota_sites);
        if self.official_site.is_none() {
            self.official_site = other.official_site;
        }
        if self.address_hint.is_none() {
            self.address_hint = other.address_hint;
        }
    }

    /// OTA sites joined for a single spreadsheet cell.
    pub fn ota_joined(&self, separator: &str) -> String {
        self.ota_sites
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
