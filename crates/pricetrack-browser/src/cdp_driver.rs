//! [`BrowserLauncher`] backed by Chrome over CDP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cdp::{CdpClient, PageSession, ReadyState};
use crate::driver::{BrowserContext, BrowserLauncher, BrowserPage, ContextOptions};
use crate::launcher::{BrowserError, ChromeLauncher, LaunchConfig, RunningBrowser};
use crate::storage::StorageState;

/// Quiet window that counts as "network idle".
const NETWORK_IDLE_WINDOW: Duration = Duration::from_millis(500);

/// Launches Chrome per pipeline and hands out isolated contexts.
pub struct CdpLauncher {
    config: LaunchConfig,
}

impl CdpLauncher {
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BrowserLauncher for CdpLauncher {
    async fn launch(
        &self,
        headless: bool,
        options: ContextOptions,
    ) -> Result<Box<dyn BrowserContext>, BrowserError> {
        let launcher = ChromeLauncher::new(LaunchConfig {
            headless,
            ..self.config.clone()
        });
        let browser = launcher.launch().await?;
        let client = browser.client().clone();

        let context_id = match client.create_browser_context().await {
            Ok(id) => id,
            Err(e) => {
                browser.shutdown().await?;
                return Err(e.into());
            }
        };

        let context = CdpContext {
            browser,
            client,
            context_id,
            user_agent: options.user_agent,
            viewport: options.viewport,
        };

        if let Some(state) = options.storage_state {
            let cookies = state.cookie_params();
            if !cookies.is_empty() {
                debug!("Restoring {} cookies", cookies.len());
                if let Err(e) = context
                    .client
                    .set_cookies(Some(&context.context_id), cookies)
                    .await
                {
                    Box::new(context).close().await?;
                    return Err(e.into());
                }
            }
        }

        Ok(Box::new(context))
    }
}

/// An isolated CDP browser context.
pub struct CdpContext {
    browser: RunningBrowser,
    client: Arc<CdpClient>,
    context_id: String,
    user_agent: Option<String>,
    viewport: Option<(u32, u32)>,
}

#[async_trait]
impl BrowserContext for CdpContext {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        let session = self.client.new_page(Some(&self.context_id)).await?;
        let page = CdpPage {
            client: self.client.clone(),
            session,
            pointer: Mutex::new((0.0, 0.0)),
        };

        if let Some(ua) = &self.user_agent {
            page.session.set_user_agent(ua).await?;
        }
        if let Some((width, height)) = self.viewport {
            page.session.set_viewport(width, height).await?;
        }

        Ok(Box::new(page))
    }

    async fn storage_state(&self) -> Result<StorageState, BrowserError> {
        let cookies = self.client.get_cookies(Some(&self.context_id)).await?;
        Ok(StorageState {
            cookies,
            origins: Vec::new(),
        })
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        let this = *self;
        if let Err(e) = this.client.dispose_browser_context(&this.context_id).await {
            warn!("Failed to dispose browser context: {}", e);
        }
        drop(this.client);
        this.browser.shutdown().await
    }
}

/// A page inside a [`CdpContext`].
pub struct CdpPage {
    client: Arc<CdpClient>,
    session: PageSession,
    /// Last pointer position, the start of the next move.
    pointer: Mutex<(f64, f64)>,
}

#[async_trait]
impl BrowserPage for CdpPage {
    async fn navigate(
        &self,
        url: &str,
        ready: ReadyState,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.session.navigate(url, ready, timeout).await?;
        Ok(())
    }

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), BrowserError> {
        self.session
            .wait_for_network_idle(NETWORK_IDLE_WINDOW, timeout)
            .await?;
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.session.wait_for_selector(selector, timeout).await?;
        Ok(())
    }

    async fn mouse_move(&self, x: f64, y: f64, steps: u32) -> Result<(), BrowserError> {
        let from = *self.pointer.lock();
        self.session.mouse_move_path(from, (x, y), steps).await?;
        *self.pointer.lock() = (x, y);
        Ok(())
    }

    async fn mouse_wheel(&self, delta_x: f64, delta_y: f64) -> Result<(), BrowserError> {
        let (x, y) = *self.pointer.lock();
        self.session.scroll(x, y, delta_x, delta_y).await?;
        Ok(())
    }

    async fn content(&self) -> Result<String, BrowserError> {
        Ok(self.session.get_content().await?)
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        self.client.close_page(&self.session).await?;
        Ok(())
    }
}
