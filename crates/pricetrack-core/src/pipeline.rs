//! Site Pipeline: one browser context, one page per URL.

use std::path::PathBuf;
use std::sync::Arc;

use pricetrack_browser::{BrowserContext, BrowserLauncher, ContextOptions};
use pricetrack_config::SiteConfig;
use pricetrack_extract::{extractor_for, CapturedDocument, Extractor, Site};
use tracing::{error, info, warn};

use crate::error::PipelineError;
use crate::fetcher::{FetchOptions, PageFetcher};
use crate::pacing::Pacer;
use crate::record::{Status, UrlResult};
use crate::sanitize::capture_filename;
use crate::session_store::SessionStore;

/// Run-level settings passed into each pipeline.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub output_dir: PathBuf,
    pub session_file: PathBuf,
    pub headless: bool,
    pub user_agent: Option<String>,
}

/// Processes a site's URLs in order, tolerating per-URL failures.
pub struct SitePipeline {
    site: Site,
    config: SiteConfig,
    extractor: Box<dyn Extractor>,
    fetcher: PageFetcher,
}

impl SitePipeline {
    pub fn new(site: Site, config: SiteConfig, pacer: Arc<Pacer>) -> Self {
        let fetcher = PageFetcher::new(FetchOptions::from_site(&config), pacer);
        Self {
            site,
            config,
            extractor: extractor_for(site),
            fetcher,
        }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    /// Run every URL and return one record per URL, in input order.
    ///
    /// Session state is loaded once before the first URL and saved once
    /// after the last. Only a failure to start the browser is returned as
    /// an error.
    pub async fn run(
        &self,
        launcher: &dyn BrowserLauncher,
        urls: &[String],
        settings: &PipelineSettings,
    ) -> Result<Vec<UrlResult>, PipelineError> {
        let name = self.site.display_name();
        tokio::fs::create_dir_all(&settings.output_dir).await?;

        let session = SessionStore::new(&settings.session_file);
        let storage_state = match session.load() {
            Ok(Some(state)) => {
                info!("{}: loading existing session from {}", name, session.path().display());
                Some(state)
            }
            Ok(None) => {
                info!("{}: no session found, creating a new session", name);
                None
            }
            Err(e) => {
                warn!("{}: ignoring unreadable session ({})", name, e);
                None
            }
        };

        let context = launcher
            .launch(
                settings.headless,
                ContextOptions {
                    user_agent: settings.user_agent.clone(),
                    viewport: Some((self.config.viewport_width, self.config.viewport_height)),
                    storage_state,
                },
            )
            .await?;

        let mut results = Vec::with_capacity(urls.len());
        for (idx, url) in urls.iter().enumerate() {
            let index = idx + 1;
            info!("[{} {}/{}] Navigating to {} ...", name, index, urls.len(), url);

            let result = self.process_url(context.as_ref(), index, url, settings).await;
            match &result.status {
                Status::Ok => info!(
                    "{} {}: price={:?} {}={:?}",
                    name,
                    index,
                    result.price,
                    self.site.identifier_field(),
                    result.identifier
                ),
                Status::Partial(reason) => warn!("{} {}: partial ({})", name, index, reason),
                Status::Error(message) => error!("{} {}: error processing {}: {}", name, index, url, message),
            }
            results.push(result);
        }

        match context.storage_state().await {
            Ok(state) => {
                if let Err(e) = session.save(&state) {
                    error!("{}: failed to persist session: {}", name, e);
                }
            }
            Err(e) => error!("{}: failed to read session state: {}", name, e),
        }

        if let Err(e) = context.close().await {
            warn!("{}: failed to close browser: {}", name, e);
        }

        Ok(results)
    }

    async fn process_url(
        &self,
        context: &dyn BrowserContext,
        index: usize,
        url: &str,
        settings: &PipelineSettings,
    ) -> UrlResult {
        let output = settings.output_dir.join(capture_filename(
            self.site.name(),
            index,
            url,
            self.config.filename_max_len,
        ));

        let page = match context.new_page().await {
            Ok(page) => page,
            Err(e) => return UrlResult::error(url, e.to_string()),
        };

        let captured = self.fetcher.capture(page.as_ref(), url, &output).await;

        if let Err(e) = page.close().await {
            warn!("Failed to close page for {}: {}", url, e);
        }

        match captured {
            Ok(capture) => match capture.missing_region {
                Some(reason) => UrlResult::partial(url, capture.path, reason),
                None => {
                    let extraction = self
                        .extractor
                        .extract(&CapturedDocument::new(&capture.path, url));
                    UrlResult::ok(url, capture.path, extraction)
                }
            },
            Err(e) => UrlResult::error(url, e.to_string()),
        }
    }
}
