//! Data types shared across the screening pipeline.

pub mod classification;
pub mod config;
pub mod facility;
pub mod outcome;
pub mod tables;
pub mod verdict;

pub use classification::ClassificationResult;
pub use config::{OfficialPolicy, ScreenConfig, ScreenMode};
pub use facility::{FacilityRecord, SearchHit};
pub use outcome::{BatchOutcome, BatchSummary, Progress, ScreenedRow};
pub use tables::ReferenceTables;
pub use verdict::{ReasonCode, Verdict};
