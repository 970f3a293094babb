//! Page Fetcher: navigate, wait, pace and capture one URL.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use pricetrack_browser::{BrowserError, BrowserPage, ReadyState};
use pricetrack_config::{LoadSignal, PacingConfig, SiteConfig};
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::pacing::Pacer;

/// A region that must render before capture.
#[derive(Debug, Clone)]
pub struct RequiredRegion {
    pub selector: String,
    pub timeout: Duration,
    /// Content awaited inside the region once it exists.
    pub inner: Option<(String, Duration)>,
}

impl RequiredRegion {
    /// Partial-status reason when the region never shows up.
    pub fn missing_reason(&self) -> String {
        format!("no {}", self.selector.trim_start_matches(['#', '.']))
    }
}

/// How a site's pages are loaded before capture.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub ready: ReadyState,
    pub navigation_timeout: Duration,
    pub network_idle_timeout: Option<Duration>,
    pub required: Option<RequiredRegion>,
    pub pacing: PacingConfig,
}

impl FetchOptions {
    pub fn from_site(site: &SiteConfig) -> Self {
        let ready = match site.load_signal {
            LoadSignal::Load => ReadyState::Complete,
            LoadSignal::DomContentLoaded => ReadyState::Interactive,
        };
        let required = site.required_selector.as_ref().map(|selector| RequiredRegion {
            selector: selector.clone(),
            timeout: Duration::from_millis(site.required_timeout_ms),
            inner: site
                .required_inner_selector
                .as_ref()
                .map(|inner| (inner.clone(), Duration::from_millis(site.inner_timeout_ms))),
        });

        Self {
            ready,
            navigation_timeout: Duration::from_millis(site.navigation_timeout_ms),
            network_idle_timeout: site.network_idle_timeout_ms.map(Duration::from_millis),
            required,
            pacing: site.pacing.clone(),
        }
    }
}

/// A document written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub path: PathBuf,
    /// Set when the required region timed out; the document is still saved.
    pub missing_region: Option<String>,
}

/// Drives one page through navigation and capture.
pub struct PageFetcher {
    options: FetchOptions,
    pacer: Arc<Pacer>,
}

impl PageFetcher {
    pub fn new(options: FetchOptions, pacer: Arc<Pacer>) -> Self {
        Self { options, pacer }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Load `url` in `page` and write its rendered markup to `output`.
    ///
    /// The page is left open; closing it is the caller's job.
    pub async fn capture(
        &self,
        page: &dyn BrowserPage,
        url: &str,
        output: &Path,
    ) -> Result<Capture, PipelineError> {
        page.navigate(url, self.options.ready, self.options.navigation_timeout)
            .await?;

        if let Some(timeout) = self.options.network_idle_timeout {
            debug!("Waiting for network to be idle...");
            if let Err(e) = page.wait_for_network_idle(timeout).await {
                warn!("Network idle wait ended early ({}), continuing anyway", e);
            }
        }

        if let Some(region) = &self.options.required {
            match page.wait_for_selector(&region.selector, region.timeout).await {
                Ok(()) => {}
                Err(BrowserError::Timeout(_)) => {
                    warn!(
                        "{} did not load, saving document for diagnostics",
                        region.selector
                    );
                    self.write_document(page, output).await?;
                    return Ok(Capture {
                        path: output.to_path_buf(),
                        missing_region: Some(region.missing_reason()),
                    });
                }
                Err(e) => return Err(e.into()),
            }

            if let Some((inner, timeout)) = &region.inner {
                page.wait_for_selector(inner, *timeout).await?;
            }
        }

        if let Err(e) = self.pacer.interact(page, &self.options.pacing).await {
            warn!("Interaction pacing failed ({}), capturing anyway", e);
        }

        self.write_document(page, output).await?;
        info!("HTML saved to {}", output.display());

        Ok(Capture {
            path: output.to_path_buf(),
            missing_region: None,
        })
    }

    async fn write_document(&self, page: &dyn BrowserPage, output: &Path) -> Result<(), PipelineError> {
        let html = page.content().await?;
        tokio::fs::write(output, html).await?;
        Ok(())
    }
}
