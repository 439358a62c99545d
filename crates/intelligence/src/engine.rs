//! Request orchestration.
//!
//! One call to [`RecommendationEngine::recommend`] gathers signals and
//! weights concurrently, makes a single oracle attempt, substitutes the
//! fallback sampler when that attempt fails, and reconciles whichever list
//! came back. The engine holds no per-request state, so one instance can
//! serve any number of concurrent requests. Dropping the returned future
//! abandons an in-flight oracle call.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, RecommendError};
use crate::fallback::sample_fallback;
use crate::oracle::{build_request, dispatch, HttpScoringOracle, ScoringOracle, ScoringOutcome};
use crate::reconcile::{reconcile, ReconcileItem};
use crate::signals::SignalAggregator;
use crate::store::Stores;
use crate::types::{EntityId, RecommendationResult, TargetSkill};
use crate::weights::{WeightConfig, WeightResolver, WeightTier};

/// Largest number of recommendations a single request may ask for.
pub const MAX_LIMIT: usize = 50;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub oracle_url: String,
    pub oracle_timeout: Duration,
    pub default_limit: usize,
    pub weights_file: Option<PathBuf>,
}

impl EngineSettings {
    /// Read settings from `SKILLPATH_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            oracle_url: skillpath_state::env_oracle_url(),
            oracle_timeout: skillpath_state::env_oracle_timeout(),
            default_limit: skillpath_state::env_default_limit(),
            weights_file: skillpath_state::legacy_weights_file(),
        }
    }

    /// Requested limit, or the default, capped at `MAX_LIMIT`.
    ///
    /// A limit of zero is honored and yields an empty result.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(MAX_LIMIT)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            oracle_url: skillpath_state::DEFAULT_ORACLE_URL.to_string(),
            oracle_timeout: Duration::from_millis(skillpath_state::DEFAULT_ORACLE_TIMEOUT_MS),
            default_limit: skillpath_state::DEFAULT_LIMIT,
            weights_file: None,
        }
    }
}

/// A caller's request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub user_id: EntityId,
    pub tenant_id: EntityId,
    #[serde(default)]
    pub target_skills: Vec<TargetSkill>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl RecommendationRequest {
    pub fn new(user_id: impl Into<EntityId>, tenant_id: impl Into<EntityId>) -> Self {
        Self {
            user_id: user_id.into(),
            tenant_id: tenant_id.into(),
            target_skills: Vec::new(),
            limit: None,
        }
    }

    pub fn with_targets(mut self, targets: Vec<TargetSkill>) -> Self {
        self.target_skills = targets;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Clone)]
pub struct RecommendationEngine {
    aggregator: SignalAggregator,
    resolver: WeightResolver,
    oracle: Arc<dyn ScoringOracle>,
    settings: EngineSettings,
}

impl RecommendationEngine {
    pub fn new(stores: Stores, oracle: Arc<dyn ScoringOracle>, settings: EngineSettings) -> Self {
        let resolver = WeightResolver::new(stores.users.clone(), settings.weights_file.clone());
        Self {
            aggregator: SignalAggregator::new(stores),
            resolver,
            oracle,
            settings,
        }
    }

    /// Build an engine that talks to the HTTP oracle named in `settings`.
    pub fn with_http_oracle(stores: Stores, settings: EngineSettings) -> Result<Self, OracleError> {
        let oracle = HttpScoringOracle::new(&settings.oracle_url, settings.oracle_timeout)?;
        Ok(Self::new(stores, Arc::new(oracle), settings))
    }

    /// Replace the weight resolver, e.g. with custom tiers.
    pub fn with_resolver(mut self, resolver: WeightResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn oracle(&self) -> &dyn ScoringOracle {
        self.oracle.as_ref()
    }

    /// The weights a tenant's requests would be scored with.
    pub async fn weights_for(&self, tenant: &EntityId) -> (WeightConfig, WeightTier) {
        self.resolver.resolve_with_tier(tenant).await
    }

    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResult, RecommendError> {
        let limit = self.settings.effective_limit(request.limit);
        let user = &request.user_id;
        let tenant = &request.tenant_id;

        let (bundle, (weights, tier)) = tokio::join!(
            self.aggregator.aggregate(user, tenant),
            self.resolver.resolve_with_tier(tenant),
        );
        let bundle = bundle?;

        let payload = build_request(&bundle, &request.target_skills, &weights, limit);
        let (items, path) = match dispatch(self.oracle.as_ref(), &payload).await {
            ScoringOutcome::Success(response) => {
                let items: Vec<ReconcileItem> = response
                    .recommendations
                    .into_iter()
                    .take(limit)
                    .filter_map(|item| {
                        let title = item.title.clone();
                        let converted = item.into_reconcile_item();
                        if converted.is_none() {
                            tracing::warn!(
                                target: "skillpath::oracle",
                                title = title.as_deref().unwrap_or_default(),
                                "Oracle item has no resource identifier; skipping"
                            );
                        }
                        converted
                    })
                    .collect();
                (items, "oracle")
            }
            ScoringOutcome::Degraded(_) => (
                sample_fallback(&bundle.candidates, limit, &mut rand::thread_rng()),
                "fallback",
            ),
        };

        let recommendations = reconcile(items, &bundle.candidates);
        tracing::info!(
            target: "skillpath::engine",
            user = %user,
            tenant = %tenant,
            path,
            weights = %tier,
            limit,
            candidates = bundle.candidates.len(),
            returned = recommendations.len(),
            "Generated recommendations"
        );

        Ok(RecommendationResult { recommendations })
    }
}
