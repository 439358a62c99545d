//! Scoring Dispatcher: one bounded call to the oracle, failures absorbed.

mod client;
mod payload;
mod response;

pub use client::{HttpScoringOracle, OracleHealth, ScoringOracle};
pub use payload::{build_request, OracleRequest, OracleResource, SkillRef};
pub use response::{OracleItem, OracleResponse};

use crate::error::OracleError;

/// What a dispatch produced. Exactly one branch per request.
#[derive(Debug)]
pub enum ScoringOutcome {
    Success(OracleResponse),
    Degraded(OracleError),
}

impl ScoringOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Call the oracle once. Never retries and never returns an error: any
/// failure is logged as a warning and reported as [`ScoringOutcome::Degraded`].
pub async fn dispatch(oracle: &dyn ScoringOracle, request: &OracleRequest) -> ScoringOutcome {
    match oracle.score(request).await {
        Ok(response) => {
            tracing::debug!(
                target: "skillpath::oracle",
                returned = response.recommendations.len(),
                "Oracle scored request"
            );
            ScoringOutcome::Success(response)
        }
        Err(err) => {
            tracing::warn!(
                target: "skillpath::oracle",
                reason = err.label(),
                error = %err,
                "Oracle unavailable, degrading to fallback"
            );
            ScoringOutcome::Degraded(err)
        }
    }
}
