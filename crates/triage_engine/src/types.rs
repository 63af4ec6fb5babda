use std::fmt;

pub type RequestId = u64;

/// One category row from a classification response.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Category {
    pub name: String,
    pub probability: f64,
}

/// Settlement of a dispatched classification call. Exactly one event is
/// emitted per command accepted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    RequestSettled {
        request_id: RequestId,
        result: Result<Vec<Category>, ClassifyError>,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClassifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClassifyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// How an outbound call failed. Timeout expiry counts as `NoResponse`: the
/// call went out and nothing came back within the wait budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    ServerRejected {
        status: u16,
        server_message: Option<String>,
    },
    NoResponse,
    RequestBuild,
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ServerRejected { status, .. } => write!(f, "server rejected ({status})"),
            FailureKind::NoResponse => write!(f, "no response"),
            FailureKind::RequestBuild => write!(f, "request not sent"),
            FailureKind::Unknown => write!(f, "unknown error"),
        }
    }
}
