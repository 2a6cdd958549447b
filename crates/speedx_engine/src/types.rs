use std::fmt;

use thiserror::Error;

pub type RequestId = u64;

/// Parsed success body, keys in the order the service sent them.
pub type Metrics = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AnalysisCompleted {
        request_id: RequestId,
        result: Result<Metrics, AnalyzeError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct AnalyzeError {
    pub kind: FailureKind,
}

impl AnalyzeError {
    pub(crate) fn new(kind: FailureKind) -> Self {
        Self { kind }
    }

    /// True when no well-formed response was received.
    pub fn is_transport(&self) -> bool {
        !matches!(self.kind, FailureKind::HttpStatus { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, reset, DNS failure and the like.
    Network,
    /// Only possible when a request timeout is configured.
    Timeout,
    /// Body was not JSON, or a success body was not a JSON object.
    InvalidBody,
    /// Non-2xx response with a JSON body. `error` is the body's `error` string, if any.
    HttpStatus { status: u16, error: Option<String> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::HttpStatus {
                status,
                error: Some(error),
            } => write!(f, "http status {status}: {error}"),
            FailureKind::HttpStatus {
                status,
                error: None,
            } => write!(f, "http status {status}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid endpoint origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },
}
