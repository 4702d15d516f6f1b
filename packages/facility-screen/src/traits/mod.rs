//! Collaborator seams: where search backends and page fetching plug in.

pub mod fetcher;
pub mod lookup;

pub use fetcher::PageFetcher;
pub use lookup::LookupProvider;
