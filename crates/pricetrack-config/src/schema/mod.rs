//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod schema_sites;

pub use schema_sites::*;

/// Shared default helper used by submodules.
pub(crate) fn default_true() -> bool {
    true
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub sites: SitesConfig,

    #[serde(default)]
    pub projection: ProjectionConfig,
}

/// Output locations for captured documents, logs and the results table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving captured documents.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Results workbook path.
    #[serde(default = "default_table")]
    pub table: PathBuf,

    /// Log directory. Defaults to `<dir>/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            table: default_table(),
            log_dir: None,
        }
    }
}

impl OutputConfig {
    /// Resolved log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.dir.join("logs"))
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_table() -> PathBuf {
    PathBuf::from("outputs").join("results.xlsx")
}

/// Browser launch configuration shared by every site pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Chrome remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Explicit Chrome executable; auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Chrome profile directory; a temporary directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How long to wait for a freshly launched Chrome to accept connections.
    #[serde(default = "default_launch_timeout_ms")]
    pub launch_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            debug_port: default_debug_port(),
            chrome_path: None,
            profile_dir: None,
            user_agent: default_user_agent(),
            launch_timeout_ms: default_launch_timeout_ms(),
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_launch_timeout_ms() -> u64 {
    6000
}

/// Blank-column marker accepted in a column layout.
pub const BLANK_COLUMN: &str = "blank column";

/// Column projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Project right after each append.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Source sheet; the first sheet when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sheet: Option<String>,

    /// Column layout tokens: column letters or the blank-column marker.
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sheet_name: default_sheet_name(),
            source_sheet: None,
            columns: default_columns(),
        }
    }
}

fn default_sheet_name() -> String {
    "converted".to_string()
}

fn default_columns() -> Vec<String> {
    [
        "a", "d", "ar", "x", "e", "as", "y", BLANK_COLUMN,
        "i", "aw", "ac", "j", "ax", "ad", BLANK_COLUMN,
        "n", "bb", "ah", "o", "bc", "ai", BLANK_COLUMN,
        "s", "bg", "am", "t", "bh", "an",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
