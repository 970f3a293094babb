//! CDP protocol types and message definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CDP request message.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP response message.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    pub params: Option<Value>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

impl CdpResponse {
    /// Classify a `Network.*` event by its effect on in-flight requests.
    pub fn network_activity(&self) -> Option<(NetworkActivity, &str)> {
        let activity = match self.method.as_deref()? {
            "Network.requestWillBeSent" => NetworkActivity::Started,
            "Network.loadingFinished" | "Network.loadingFailed" => NetworkActivity::Finished,
            _ => return None,
        };
        let request_id = self.params.as_ref()?.get("requestId")?.as_str()?;
        Some((activity, request_id))
    }
}

/// Effect of a network event on the in-flight request set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkActivity {
    Started,
    Finished,
}

/// CDP error in response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
    pub data: Option<String>,
}

/// Browser version info.
///
/// Note: Chrome returns PascalCase field names for this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "User-Agent")]
    pub user_agent: String,
    #[serde(rename = "V8-Version")]
    pub v8_version: Option<String>,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// Mouse event type.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MouseMoved,
    MouseWheel,
}

/// `document.readyState` a navigation waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// DOM parsed (`DOMContentLoaded`).
    Interactive,
    /// All subresources loaded (`load`).
    Complete,
}

impl ReadyState {
    /// Whether the page's reported `document.readyState` satisfies this target.
    pub fn reached(self, state: &str) -> bool {
        match self {
            ReadyState::Interactive => state == "interactive" || state == "complete",
            ReadyState::Complete => state == "complete",
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
