//! Chrome automation for pricetrack.
//!
//! - [`cdp`]: Chrome DevTools Protocol client and page sessions
//! - [`launcher`]: Chrome discovery and process launch
//! - [`driver`]: the browser traits the site pipelines run against
//! - [`cdp_driver`]: the CDP implementation of those traits

pub mod cdp;
pub mod cdp_driver;
pub mod driver;
pub mod launcher;
pub mod storage;

pub use cdp::{CdpClient, CdpError, PageSession, ReadyState};
pub use cdp_driver::{CdpContext, CdpLauncher, CdpPage};
pub use driver::{BrowserContext, BrowserLauncher, BrowserPage, ContextOptions};
pub use launcher::{BrowserError, ChromeLauncher, LaunchConfig, RunningBrowser};
pub use storage::StorageState;
