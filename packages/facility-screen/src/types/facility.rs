//! Input records and raw search hits.

use serde::{Deserialize, Serialize};

/// One lodging facility read from an input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub name: String,

    /// Address already present in the input row, if any.
    pub known_address: Option<String>,

    /// Website already present in the input row, if any.
    pub known_website: Option<String>,
}

impl FacilityRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            known_address: None,
            known_website: None,
        }
    }

    /// Attach an address. Blank values are treated as absent.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.known_address = non_blank(address.into());
        self
    }

    /// Attach a website. Blank values are treated as absent.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.known_website = non_blank(website.into());
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A ranked search result as returned by a `LookupProvider`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub description: String,
}

impl SearchHit {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
