//! In-memory browser driver for pipeline tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pricetrack_browser::{
    BrowserContext, BrowserError, BrowserLauncher, BrowserPage, ContextOptions, ReadyState,
    StorageState,
};
use serde_json::json;

/// How a fake page behaves for a URL.
#[derive(Debug, Clone)]
pub enum FakePage {
    /// Loads and renders this markup.
    Html(String),
    /// Loads, but `selector` never appears.
    MissingSelector { selector: String, html: String },
    /// Navigation fails with this message.
    NavigationError(String),
    /// Loads, but background requests never settle.
    BusyNetwork(String),
    /// Loads, but every pointer and wheel event is rejected.
    PointerRejected(String),
}

/// Everything the fake observed.
#[derive(Debug, Default)]
pub struct FakeLog {
    pub launches: Vec<ContextOptions>,
    pub navigations: Vec<String>,
    pub pages_opened: usize,
    pub pages_closed: usize,
    pub contexts_closed: usize,
    pub mouse_moves: usize,
    pub wheels: usize,
}

#[derive(Clone, Default)]
pub struct FakeLauncher {
    pages: Arc<HashMap<String, FakePage>>,
    fail_launch: bool,
    pub log: Arc<Mutex<FakeLog>>,
}

impl FakeLauncher {
    pub fn new(pages: impl IntoIterator<Item = (String, FakePage)>) -> Self {
        Self {
            pages: Arc::new(pages.into_iter().collect()),
            fail_launch: false,
            log: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(
        &self,
        _headless: bool,
        options: ContextOptions,
    ) -> Result<Box<dyn BrowserContext>, BrowserError> {
        if self.fail_launch {
            return Err(BrowserError::ChromeNotFound);
        }
        self.log.lock().launches.push(options);
        Ok(Box::new(FakeContext {
            pages: self.pages.clone(),
            log: self.log.clone(),
        }))
    }
}

struct FakeContext {
    pages: Arc<HashMap<String, FakePage>>,
    log: Arc<Mutex<FakeLog>>,
}

#[async_trait]
impl BrowserContext for FakeContext {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        self.log.lock().pages_opened += 1;
        Ok(Box::new(FakeTab {
            pages: self.pages.clone(),
            log: self.log.clone(),
            current: Mutex::new(None),
        }))
    }

    async fn storage_state(&self) -> Result<StorageState, BrowserError> {
        Ok(StorageState {
            cookies: vec![json!({"name": "session", "value": "fake", "domain": "example.com"})],
            origins: vec![],
        })
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        self.log.lock().contexts_closed += 1;
        Ok(())
    }
}

struct FakeTab {
    pages: Arc<HashMap<String, FakePage>>,
    log: Arc<Mutex<FakeLog>>,
    current: Mutex<Option<FakePage>>,
}

impl FakeTab {
    fn current(&self) -> Result<FakePage, BrowserError> {
        self.current.lock().clone().ok_or(BrowserError::NotConnected)
    }

    fn pointer_allowed(&self) -> Result<(), BrowserError> {
        match self.current()? {
            FakePage::PointerRejected(_) => Err(BrowserError::ActionFailed(
                "Input.dispatchMouseEvent rejected".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl BrowserPage for FakeTab {
    async fn navigate(
        &self,
        url: &str,
        _ready: ReadyState,
        _timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.log.lock().navigations.push(url.to_string());
        match self.pages.get(url) {
            Some(FakePage::NavigationError(message)) => {
                Err(BrowserError::NavigationFailed(message.clone()))
            }
            Some(page) => {
                *self.current.lock() = Some(page.clone());
                Ok(())
            }
            None => Err(BrowserError::NavigationFailed("net::ERR_NAME_NOT_RESOLVED".to_string())),
        }
    }

    async fn wait_for_network_idle(&self, _timeout: Duration) -> Result<(), BrowserError> {
        match self.current()? {
            FakePage::BusyNetwork(_) => Err(BrowserError::Timeout(
                "Network did not become idle".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<(), BrowserError> {
        match self.current()? {
            FakePage::MissingSelector { selector: missing, .. } if missing == selector => Err(
                BrowserError::Timeout(format!("Waiting for selector '{}' timed out", selector)),
            ),
            _ => Ok(()),
        }
    }

    async fn mouse_move(&self, _x: f64, _y: f64, _steps: u32) -> Result<(), BrowserError> {
        self.log.lock().mouse_moves += 1;
        self.pointer_allowed()
    }

    async fn mouse_wheel(&self, _dx: f64, _dy: f64) -> Result<(), BrowserError> {
        self.log.lock().wheels += 1;
        self.pointer_allowed()
    }

    async fn content(&self) -> Result<String, BrowserError> {
        match self.current()? {
            FakePage::Html(html)
            | FakePage::MissingSelector { html, .. }
            | FakePage::BusyNetwork(html)
            | FakePage::PointerRejected(html) => Ok(html),
            FakePage::NavigationError(_) => Err(BrowserError::NotConnected),
        }
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        self.log.lock().pages_closed += 1;
        Ok(())
    }
}

pub const AMAZON_PAGE: &str = r#"<html><body>
<span class="a-price-symbol">$</span><span class="a-price-whole">1,799<span class="a-price-decimal">.</span></span><span class="a-price-fraction">99</span>
<table><tr><th>Item model number</th><td>SM-F966UDBEXAA</td></tr></table>
</body></html>"#;

pub const BESTBUY_PAGE: &str = r#"<html><body>
<div data-testid="price-block-customer-price"><span>$1,419.99</span></div>
<div class="disclaimer"><span class="inline-block">Model: SM-S938UZKEXAA</span></div>
</body></html>"#;

pub const SAMSUNG_PAGE: &str = r#"<html><body><div id="device_info">
<div role="radio" aria-checked="true"><span>512GB</span><span>$1,299.99</span><span>was: $1,419.99</span></div>
</div></body></html>"#;
