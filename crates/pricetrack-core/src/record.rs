//! Per-URL result records.

use std::fmt;
use std::path::PathBuf;

use pricetrack_extract::{Extraction, Site};
use serde_json::Value;

/// Outcome of one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// Document captured but a required region never appeared.
    Partial(String),
    Error(String),
}

impl Status {
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => f.write_str("ok"),
            Status::Partial(reason) => write!(f, "partial: {}", reason),
            Status::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// One URL's record within a site run.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlResult {
    pub url: String,
    /// Captured document, absent when capture failed.
    pub file: Option<PathBuf>,
    pub price: Option<String>,
    /// Model number or SKU.
    pub identifier: Option<String>,
    pub status: Status,
}

impl UrlResult {
    pub fn ok(url: &str, file: PathBuf, extraction: Extraction) -> Self {
        Self {
            url: url.to_string(),
            file: Some(file),
            price: extraction.price,
            identifier: extraction.identifier,
            status: Status::Ok,
        }
    }

    pub fn partial(url: &str, file: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            file: Some(file),
            price: None,
            identifier: None,
            status: Status::Partial(reason.into()),
        }
    }

    pub fn error(url: &str, message: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            file: None,
            price: None,
            identifier: None,
            status: Status::Error(message.into()),
        }
    }

    /// Named fields in record order: url, file, price, model or sku, status.
    pub fn fields(&self, site: Site) -> Vec<(&'static str, Value)> {
        let opt = |v: &Option<String>| v.clone().map_or(Value::Null, Value::String);
        vec![
            ("url", Value::String(self.url.clone())),
            (
                "file",
                self.file
                    .as_ref()
                    .map_or(Value::Null, |p| Value::String(p.display().to_string())),
            ),
            ("price", opt(&self.price)),
            (site.identifier_field(), opt(&self.identifier)),
            ("status", Value::String(self.status.to_string())),
        ]
    }
}
