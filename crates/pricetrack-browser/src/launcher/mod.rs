//! Chrome process launcher.
//!
//! Starts Chrome with remote debugging enabled (or reuses one already
//! listening on the debug port) and connects a [`CdpClient`](crate::CdpClient).

mod launcher_core;
mod launcher_types;

pub use launcher_core::{ChromeLauncher, RunningBrowser};
pub use launcher_types::{BrowserError, LaunchConfig};

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
