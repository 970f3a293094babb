//! Chrome discovery, launch and connection.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{info, warn};

use super::{BrowserError, LaunchConfig};
use crate::cdp::CdpClient;

/// Launches (or reuses) a Chrome instance with remote debugging.
pub struct ChromeLauncher {
    config: LaunchConfig,
}

/// A connected Chrome instance.
///
/// Holds the child process when this launcher started it, so
/// [`RunningBrowser::shutdown`] only kills browsers it owns.
pub struct RunningBrowser {
    client: Arc<CdpClient>,
    process: Option<Child>,
}

impl RunningBrowser {
    /// CDP client connected to the browser.
    pub fn client(&self) -> &Arc<CdpClient> {
        &self.client
    }

    /// Kill Chrome if we launched it.
    pub async fn shutdown(mut self) -> Result<(), BrowserError> {
        if let Some(mut child) = self.process.take() {
            info!("Shutting down Chrome...");
            if let Err(e) = child.kill().await {
                warn!("Failed to kill Chrome: {}", e);
            }
        }
        Ok(())
    }
}

impl ChromeLauncher {
    /// Create a new launcher.
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            let paths = [
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
                "/Applications/Chromium.app/Contents/MacOS/Chromium",
                "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
            ];
            for path in &paths {
                let p = PathBuf::from(path);
                if p.exists() {
                    return Some(p);
                }
            }
        }

        #[cfg(target_os = "linux")]
        {
            let paths = [
                "/usr/bin/google-chrome",
                "/usr/bin/google-chrome-stable",
                "/usr/bin/chromium",
                "/usr/bin/chromium-browser",
                "/snap/bin/chromium",
            ];
            for path in &paths {
                let p = PathBuf::from(path);
                if p.exists() {
                    return Some(p);
                }
            }
        }

        #[cfg(target_os = "windows")]
        {
            let paths = [
                r"C:\Program Files\Google\Chrome\Application\chrome.exe",
                r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            ];
            for path in &paths {
                let p = PathBuf::from(path);
                if p.exists() {
                    return Some(p);
                }
            }
        }

        None
    }

    /// Command-line flags for a launched Chrome.
    pub(super) fn chrome_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.config.debug_port),
            format!("--user-data-dir={}", self.config.get_profile_dir().display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
        ];
        if self.config.headless {
            args.push("--headless=new".to_string());
        }
        args
    }

    /// Check if Chrome is already running on the debug port.
    async fn is_chrome_running(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    /// Spawn Chrome with remote debugging enabled.
    async fn spawn_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = match &self.config.chrome_path {
            Some(path) => path.clone(),
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?,
        };
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            "Launching Chrome (headless: {}) with profile at: {}",
            self.config.headless,
            profile_dir.display()
        );

        let child = Command::new(&chrome_path)
            .args(self.chrome_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to Chrome, launching it first if nothing listens on the port.
    pub async fn launch(&self) -> Result<RunningBrowser, BrowserError> {
        let mut process = None;

        if !self.is_chrome_running().await {
            info!("Chrome not running on port {}, launching...", self.config.debug_port);
            let child = self.spawn_chrome().await?;
            process = Some(child);

            let poll = Duration::from_millis(200);
            let start = tokio::time::Instant::now();
            loop {
                tokio::time::sleep(poll).await;
                if self.is_chrome_running().await {
                    break;
                }
                if start.elapsed() >= self.config.launch_timeout {
                    return Err(BrowserError::LaunchFailed(
                        "Chrome failed to start within timeout".to_string(),
                    ));
                }
            }
        } else {
            warn!(
                "Chrome already running on port {}, reusing it (headless setting not applied)",
                self.config.debug_port
            );
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        info!("Connected to Chrome at {}", self.config.endpoint());

        Ok(RunningBrowser {
            client: Arc::new(client),
            process,
        })
    }
}
