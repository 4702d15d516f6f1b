//! The screening pipeline, leaf to root: host classification, evidence
//! extraction, the lookup loop, the eligibility verdict, and the batch runner.

pub mod batch;
pub mod classify;
pub mod evidence;
pub mod geo;
pub mod judge;
pub mod orchestrate;
pub mod pacer;

pub use batch::BatchRunner;
pub use classify::{classify, classify_host, extract_host, DomainClass};
pub use evidence::{name_keys, EvidenceExtractor};
pub use geo::{extract_prefecture, find_address, is_remote_island};
pub use judge::EligibilityJudge;
pub use orchestrate::Orchestrator;
pub use pacer::Pacer;
