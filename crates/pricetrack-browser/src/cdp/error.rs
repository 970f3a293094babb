//! Errors raised while talking to Chrome over the DevTools protocol.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdpError {
    /// The debugging endpoint is not a valid URL.
    #[error("Invalid debugging endpoint: {0}")]
    InvalidEndpoint(String),

    /// Nothing answered `/json/version` at the endpoint.
    #[error("No browser listening at {0}")]
    EndpointUnavailable(String),

    /// The browser WebSocket could not be opened.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Sending on an open WebSocket failed.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Chrome answered a command with an error object.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `Page.navigate` reported an `errorText`.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// An evaluated script threw.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    /// The WebSocket closed before a reply or event arrived.
    #[error("Session closed")]
    SessionClosed,

    /// A reply lacked a field the caller needs.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::InvalidEndpoint(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_message() {
        let err = CdpError::Protocol {
            code: -32000,
            message: "Cannot find context with specified id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CDP error: Cannot find context with specified id (code: -32000)"
        );
    }

    #[test]
    fn test_url_parse_error_is_invalid_endpoint() {
        let err: CdpError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, CdpError::InvalidEndpoint(_)));
    }
}
