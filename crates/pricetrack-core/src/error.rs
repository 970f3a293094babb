//! Pipeline error types.

use std::path::PathBuf;

use pricetrack_browser::BrowserError;
use thiserror::Error;

/// Errors that abort a site pipeline or a single URL capture.
///
/// Within a pipeline, URL-level errors become [`Status::Error`](crate::Status)
/// records; only launch failures escape [`SitePipeline::run`](crate::SitePipeline::run).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("Session file {path}: {source}")]
    SessionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file {path} is not valid JSON: {source}")]
    SessionFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
