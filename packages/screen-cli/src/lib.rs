//! Batch front end for `facility_screen`: environment config and CSV row I/O.

pub mod config;
pub mod rows;

pub use config::{Config, ProviderKind};
