//! Navigation and wait operations for CDP page session.

use std::collections::HashSet;
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{NetworkActivity, ReadyState};

use super::core::PageSession;

/// Poll interval for ready-state and selector waits.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate to URL and wait until the page reaches `ready`.
    pub async fn navigate(
        &self,
        url: &str,
        ready: ReadyState,
        timeout: Duration,
    ) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(
                error.as_str().unwrap_or("Unknown error").to_string(),
            ));
        }

        let frame_id = result["frameId"]
            .as_str()
            .unwrap_or("main")
            .to_string();

        self.wait_for_ready_state(ready, timeout).await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Wait for `document.readyState` to reach `ready`.
    pub async fn wait_for_ready_state(
        &self,
        ready: ReadyState,
        timeout: Duration,
    ) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let result = self.evaluate("document.readyState").await?;

            if let Some(state) = result.as_str() {
                if ready.reached(state) {
                    return Ok(());
                }
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait until no network request has been in flight for `idle`.
    ///
    /// Consumes the session's buffered `Network.*` events, so requests
    /// started during navigation are accounted for.
    pub async fn wait_for_network_idle(
        &self,
        idle: Duration,
        timeout: Duration,
    ) -> Result<(), CdpError> {
        let deadline = Instant::now() + timeout;
        let mut in_flight: HashSet<String> = HashSet::new();
        let mut quiet_since = Instant::now();
        let mut events = self.events.lock().await;

        loop {
            let now = Instant::now();
            if in_flight.is_empty() && now.duration_since(quiet_since) >= idle {
                return Ok(());
            }
            if now >= deadline {
                return Err(CdpError::Timeout(format!(
                    "Network idle timed out with {} requests in flight",
                    in_flight.len()
                )));
            }

            let wait = if in_flight.is_empty() {
                (quiet_since + idle).saturating_duration_since(now)
            } else {
                deadline.saturating_duration_since(now)
            };

            match tokio::time::timeout(wait, events.recv()).await {
                Ok(Some(event)) => {
                    if let Some((activity, request_id)) = event.network_activity() {
                        match activity {
                            NetworkActivity::Started => {
                                in_flight.insert(request_id.to_string());
                            }
                            NetworkActivity::Finished => {
                                in_flight.remove(request_id);
                                if in_flight.is_empty() {
                                    quiet_since = Instant::now();
                                }
                            }
                        }
                    }
                }
                Ok(None) => return Err(CdpError::SessionClosed),
                Err(_) => {}
            }
        }
    }

    /// Wait for selector to appear.
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<i64, CdpError> {
        let start = Instant::now();

        loop {
            if let Some(node_id) = self.query_selector(selector).await? {
                return Ok(node_id);
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout(format!(
                    "Waiting for selector '{}' timed out",
                    selector
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
