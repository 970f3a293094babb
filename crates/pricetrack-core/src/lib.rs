//! Site pipelines and run orchestration for pricetrack.
//!
//! A run drives one [`SitePipeline`] per enabled site, flattens the
//! per-URL results into a single record and appends it to the history
//! table.

pub mod error;
pub mod fetcher;
pub mod flatten;
pub mod pacing;
pub mod pipeline;
pub mod record;
pub mod runner;
pub mod sanitize;
pub mod session_store;

pub use error::PipelineError;
pub use fetcher::{Capture, FetchOptions, PageFetcher};
pub use flatten::{flatten, format_timestamp};
pub use pacing::Pacer;
pub use pipeline::{PipelineSettings, SitePipeline};
pub use record::{Status, UrlResult};
pub use runner::{PersistOutcome, RunReport, Runner, SiteReport};
pub use sanitize::{capture_filename, sanitize_filename, DEFAULT_MAX_LEN};
pub use session_store::SessionStore;
