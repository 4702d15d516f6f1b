//! Lodging Facility Screening Library
//!
//! Takes a list of Japanese lodging facilities and, for each one, finds its
//! official website and OTA listings through a web-search backend, then
//! decides whether the facility is a sales target for a website-building
//! service.
//!
//! # Usage
//!
//! ```rust,ignore
//! use facility_screen::{BatchRunner, FacilityRecord, ReferenceTables, ScreenConfig};
//! use facility_screen::providers::{BraveSearchProvider, HttpPageFetcher};
//! use std::sync::Arc;
//!
//! let provider = BraveSearchProvider::new(api_key);
//! let runner = BatchRunner::new(
//!     provider,
//!     HttpPageFetcher::new(),
//!     Arc::new(ReferenceTables::default()),
//!     ScreenConfig::default(),
//! )?;
//!
//! let outcome = runner.run(&facilities, |p| println!("{}/{}", p.processed, p.total)).await;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Facility records, search hits, verdicts, reference tables
//! - [`traits`] - Lookup provider and page fetcher seams
//! - [`pipeline`] - Classification, evidence, lookup loop, verdict, batch
//! - [`providers`] - Brave / SerpAPI search and the HTTP page fetcher
//! - [`security`] - API keys and URL safety checks
//! - [`testing`] - Mock collaborators for tests

pub mod error;
pub mod pipeline;
pub mod providers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{ConfigError, FetchError, LookupError, ScreenError, SecurityError};
pub use pipeline::{BatchRunner, EligibilityJudge, EvidenceExtractor, Orchestrator};
pub use traits::{LookupProvider, PageFetcher};
pub use types::{
    BatchOutcome, BatchSummary, ClassificationResult, FacilityRecord, OfficialPolicy, Progress,
    ReasonCode, ReferenceTables, ScreenConfig, ScreenMode, ScreenedRow, SearchHit, Verdict,
};
