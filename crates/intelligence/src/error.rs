//! Error types surfaced by the engine.
//!
//! Only two failures ever reach a caller: the requester does not exist, or
//! something unexpected broke while gathering signals. Oracle trouble and
//! unreadable weight configuration are absorbed where they happen.

use crate::types::EntityId;
use std::time::Duration;

/// Failures a recommendation request can end with.
#[derive(thiserror::Error, Debug)]
pub enum RecommendError {
    /// The requester has no profile in the requested tenant.
    #[error("user not found: {0}")]
    UserNotFound(EntityId),
    /// Any other failure while assembling the request. No partial result.
    #[error("failed to generate recommendations: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RecommendError {
    /// True for failures the caller caused rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }
}

/// Why the scoring oracle could not be used for a request.
#[derive(thiserror::Error, Debug)]
pub enum OracleError {
    #[error("failed to build oracle HTTP client: {0}")]
    Client(String),
    #[error("oracle unreachable: {0}")]
    Transport(String),
    #[error("oracle did not answer within {0:?}")]
    Timeout(Duration),
    #[error("oracle returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("oracle response malformed: {0}")]
    Malformed(String),
}

impl OracleError {
    /// Short label used in structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Client(_) => "client",
            Self::Transport(_) => "transport",
            Self::Timeout(_) => "timeout",
            Self::Status { .. } => "status",
            Self::Malformed(_) => "malformed",
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
