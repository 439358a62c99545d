//! Learning resource recommendations for employees.
//!
//! This crate provides:
//! - Tenant-scoped signal aggregation (skills, goals, performance, peers, catalog)
//! - Weight resolution with admin, legacy-file and default tiers
//! - A bounded call to an external scoring oracle with a random-sample fallback
//! - Reconciliation that backfills providers and keeps resource ids unique

pub mod engine;
pub mod error;
pub mod fallback;
pub mod oracle;
pub mod reconcile;
pub mod signals;
pub mod store;
pub mod types;
pub mod weights;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{EngineSettings, RecommendationEngine, RecommendationRequest, MAX_LIMIT};
pub use error::{OracleError, RecommendError};
pub use fallback::sample_fallback;
pub use oracle::{
    build_request, dispatch, HttpScoringOracle, OracleHealth, OracleItem, OracleRequest,
    OracleResponse, ScoringOracle, ScoringOutcome,
};
pub use reconcile::{reconcile, ReconcileItem};
pub use signals::{
    build_peer_profiles, resolve_provider, select_goal_text, tenant_catalog, SignalAggregator,
    SignalBundle, PERFORMANCE_WINDOW,
};
pub use store::{
    Dataset, MemStore, PerformanceStore, PlanStore, ResourceStore, SkillStore, Stores, UserStore,
};
pub use types::{
    Creator, DevelopmentPlan, EntityId, PeerProfile, PerformanceRecord, PlanStatus,
    Recommendation, RecommendationResult, ResourceCandidate, ResourceRecord, Skill, SkillLevel,
    TargetSkill, UserProfile, UNKNOWN_PROVIDER,
};
pub use weights::{
    AdminWeightSource, LegacyFileWeightSource, SignalCategory, Weight, WeightConfig,
    WeightConfigError, WeightResolver, WeightSource, WeightTier,
};
