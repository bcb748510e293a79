use std::fmt::Display;

use serde::de::Error;

/// Wire-visible error classification, serialized into failure responses so
/// callers can tell a gateway rejection from a transport problem without
/// parsing the free-text diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    UpstreamAuth,
    UpstreamRejected,
    UpstreamTimeout,
    UpstreamTransport,
    UpstreamMalformed,
    Internal,
}

#[derive(Debug)]
pub enum GatewayError {
    Timeout(reqwest::Error),
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    Deserialization(serde_json::Error),
}

impl GatewayError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Timeout(_) => ErrorCode::UpstreamTimeout,
            GatewayError::Transport(_) => ErrorCode::UpstreamTransport,
            GatewayError::Status { .. } => ErrorCode::UpstreamRejected,
            GatewayError::Deserialization(_) => ErrorCode::UpstreamMalformed,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            return Self::Timeout(value);
        }
        if value.is_decode() {
            return Self::Deserialization(serde_json::Error::custom(
                "failed to decode response body",
            ));
        }
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Deserialization(value)
    }
}

impl std::error::Error for GatewayError {}

impl Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Timeout(e) => write!(f, "gateway request timed out: {e}"),
            GatewayError::Transport(e) => write!(f, "http request error: {e}"),
            GatewayError::Status { status, body } => {
                write!(f, "gateway returned {status}: {body}")
            }
            GatewayError::Deserialization(e) => {
                write!(f, "gateway response deserialization: {e}")
            }
        }
    }
}
