//! Signal Aggregator: everything the oracle needs to know about a requester.
//!
//! Every fetch is tenant-scoped and read-only. The independent lookups are
//! issued concurrently and their results are owned by the returned bundle;
//! nothing survives the request.

mod catalog;
mod goal;
mod peers;

pub use catalog::{resolve_provider, tenant_catalog};
pub use goal::select_goal_text;
pub use peers::build_peer_profiles;

use anyhow::Context;

use crate::error::RecommendError;
use crate::store::Stores;
use crate::types::{
    dedup_skill_levels, DevelopmentPlan, EntityId, PeerProfile, PerformanceRecord,
    ResourceCandidate, Skill, SkillLevel, UserProfile,
};

/// Number of performance reports forwarded to the oracle.
pub const PERFORMANCE_WINDOW: usize = 5;

/// The aggregated signals for one request.
#[derive(Debug, Clone)]
pub struct SignalBundle {
    pub requester: UserProfile,
    pub self_skills: Vec<SkillLevel>,
    pub goal_text: String,
    /// Most recent first, at most [`PERFORMANCE_WINDOW`] entries.
    pub performance: Vec<PerformanceRecord>,
    pub candidates: Vec<ResourceCandidate>,
    pub peers: Vec<PeerProfile>,
    pub taxonomy: Vec<Skill>,
}

impl SignalBundle {
    /// Role tag sent to the oracle.
    pub fn persona(&self) -> &str {
        self.requester
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_PERSONA)
    }
}

const DEFAULT_PERSONA: &str = "employee";

/// Collects signals from the read stores.
#[derive(Clone)]
pub struct SignalAggregator {
    stores: Stores,
}

impl SignalAggregator {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Gather the signal bundle for `requester` within `tenant`.
    ///
    /// A requester that does not exist, or exists in another tenant, is
    /// `UserNotFound` whatever the other fetches returned. Any other store
    /// failure is `Internal` and no partial bundle is returned.
    pub async fn aggregate(
        &self,
        requester: &EntityId,
        tenant: &EntityId,
    ) -> Result<SignalBundle, RecommendError> {
        let (profile, rest) = tokio::join!(
            self.requester_profile(requester),
            async {
                tokio::try_join!(
                    self.goal_text(requester),
                    self.performance(requester),
                    self.catalog_and_peers(requester, tenant),
                    self.taxonomy(),
                )
            },
        );

        let requester_profile = match profile? {
            Some(p) if &p.tenant_id == tenant => p,
            Some(p) => {
                tracing::warn!(
                    target: "skillpath::signals",
                    user = %requester,
                    requested_tenant = %tenant,
                    actual_tenant = %p.tenant_id,
                    "Requester belongs to a different tenant"
                );
                return Err(RecommendError::UserNotFound(requester.clone()));
            }
            None => return Err(RecommendError::UserNotFound(requester.clone())),
        };
        let (goal_text, performance, (candidates, peers), taxonomy) = rest?;

        let self_skills = dedup_skill_levels(requester_profile.skills.clone());
        tracing::debug!(
            target: "skillpath::signals",
            user = %requester,
            tenant = %tenant,
            skills = self_skills.len(),
            performance = performance.len(),
            candidates = candidates.len(),
            peers = peers.len(),
            has_goal = !goal_text.is_empty(),
            "Aggregated signals"
        );

        Ok(SignalBundle {
            requester: requester_profile,
            self_skills,
            goal_text,
            performance,
            candidates,
            peers,
            taxonomy,
        })
    }

    async fn requester_profile(&self, requester: &EntityId) -> anyhow::Result<Option<UserProfile>> {
        self.stores
            .users
            .user(requester)
            .await
            .with_context(|| format!("loading profile {requester}"))
    }

    async fn goal_text(&self, requester: &EntityId) -> anyhow::Result<String> {
        let plans: Vec<DevelopmentPlan> = self
            .stores
            .plans
            .plans_for_employees(std::slice::from_ref(requester))
            .await
            .with_context(|| format!("loading development plans for {requester}"))?
            .into_iter()
            .filter(|p| &p.employee_id == requester)
            .collect();
        Ok(select_goal_text(&plans))
    }

    async fn performance(&self, requester: &EntityId) -> anyhow::Result<Vec<PerformanceRecord>> {
        let mut reports: Vec<_> = self
            .stores
            .performance
            .recent_reports(requester, PERFORMANCE_WINDOW)
            .await
            .with_context(|| format!("loading performance reports for {requester}"))?
            .into_iter()
            .filter(|r| &r.employee_id == requester)
            .collect();
        // Stores promise newest first; enforce it rather than trust it.
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports.truncate(PERFORMANCE_WINDOW);
        Ok(reports)
    }

    async fn catalog_and_peers(
        &self,
        requester: &EntityId,
        tenant: &EntityId,
    ) -> anyhow::Result<(Vec<ResourceCandidate>, Vec<PeerProfile>)> {
        let members: Vec<UserProfile> = self
            .stores
            .users
            .tenant_members(tenant)
            .await
            .with_context(|| format!("listing members of tenant {tenant}"))?
            .into_iter()
            .filter(|m| &m.tenant_id == tenant)
            .collect();
        let member_ids: Vec<EntityId> = members.iter().map(|m| m.id.clone()).collect();

        let (resources, plans) = tokio::try_join!(
            async {
                self.stores
                    .resources
                    .resources_created_by(&member_ids)
                    .await
                    .with_context(|| format!("listing resources of tenant {tenant}"))
            },
            async {
                self.stores
                    .plans
                    .plans_for_employees(&member_ids)
                    .await
                    .with_context(|| format!("listing development plans of tenant {tenant}"))
            },
        )?;

        let candidates = tenant_catalog(&members, resources);
        let peers = build_peer_profiles(requester, &members, &plans);
        Ok((candidates, peers))
    }

    async fn taxonomy(&self) -> anyhow::Result<Vec<Skill>> {
        self.stores
            .skills
            .skills()
            .await
            .context("loading skill taxonomy")
    }
}
