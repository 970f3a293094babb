//! Launcher type definitions and configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cdp::CdpError;

/// Browser errors surfaced to pipelines.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Chrome not found. Please install Google Chrome or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::EndpointUnavailable(msg) | CdpError::InvalidEndpoint(msg) => {
                BrowserError::ConnectionFailed(msg)
            }
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::JavaScript(msg) => BrowserError::ActionFailed(format!("JS error: {}", msg)),
            CdpError::Timeout(msg) => BrowserError::Timeout(msg),
            CdpError::SessionClosed => BrowserError::NotConnected,
            _ => BrowserError::ActionFailed(e.to_string()),
        }
    }
}

/// Chrome launch configuration.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Whether to run Chrome in headless mode.
    pub headless: bool,
    /// Explicit Chrome executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    /// Profile directory; a temporary directory when `None`.
    pub profile_dir: Option<PathBuf>,
    /// How long to wait for a launched Chrome to answer on the debug port.
    pub launch_timeout: Duration,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            headless: true,
            chrome_path: None,
            profile_dir: None,
            launch_timeout: Duration::from_secs(6),
        }
    }
}

impl LaunchConfig {
    /// Get the profile directory, falling back to a temporary one.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("pricetrack-chrome-profile"))
    }

    /// Get the CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}
