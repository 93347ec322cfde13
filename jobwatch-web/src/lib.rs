//! Page acquisition and term matching.
//!
//! - Page fetcher trait and reqwest-backed implementation with a fixed
//!   browser-like header set (`fetch`)
//! - HTML text extraction driven by a per-site [`ExtractionPolicy`] (`extract`)
//! - Plain substring matching of the main term and search terms (`matcher`)
//! - Per-site check that folds every failure into a non-match (`check`)

pub mod check;
pub mod extract;
pub mod fetch;
pub mod matcher;

pub use check::{check_site, CheckOutcome, SiteCheck};
pub use extract::{extract_text, ExtractError};
pub use fetch::{browser_headers, FetchedPage, HttpPageFetcher, PageFetcher};
pub use jobwatch_config::{ExtractionPolicy, SiteTarget};
pub use matcher::MatchCriteria;
