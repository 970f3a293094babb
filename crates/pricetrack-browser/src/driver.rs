//! Browser driver abstraction used by the site pipelines.
//!
//! The pipelines only see these traits, so tests can substitute in-memory
//! fakes for a real Chrome.

use std::time::Duration;

use async_trait::async_trait;

use crate::cdp::ReadyState;
use crate::launcher::BrowserError;
use crate::storage::StorageState;

/// Options for an isolated browser context.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    pub user_agent: Option<String>,
    /// Viewport `(width, height)` applied to every page.
    pub viewport: Option<(u32, u32)>,
    /// Session state restored into the context before any page opens.
    pub storage_state: Option<StorageState>,
}

/// Starts a browser and opens an isolated context in it.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(
        &self,
        headless: bool,
        options: ContextOptions,
    ) -> Result<Box<dyn BrowserContext>, BrowserError>;
}

/// An isolated browser context owning its cookie jar.
#[async_trait]
pub trait BrowserContext: Send + Sync {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError>;

    /// Current cookies and storage of the context.
    async fn storage_state(&self) -> Result<StorageState, BrowserError>;

    /// Dispose the context and release the browser.
    async fn close(self: Box<Self>) -> Result<(), BrowserError>;
}

/// One open page.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    async fn navigate(
        &self,
        url: &str,
        ready: ReadyState,
        timeout: Duration,
    ) -> Result<(), BrowserError>;

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), BrowserError>;

    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
        -> Result<(), BrowserError>;

    /// Move the pointer from its last position to `(x, y)` in `steps` events.
    async fn mouse_move(&self, x: f64, y: f64, steps: u32) -> Result<(), BrowserError>;

    async fn mouse_wheel(&self, delta_x: f64, delta_y: f64) -> Result<(), BrowserError>;

    /// Full rendered document markup.
    async fn content(&self) -> Result<String, BrowserError>;

    async fn close(self: Box<Self>) -> Result<(), BrowserError>;
}
