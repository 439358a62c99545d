//! Query-only interfaces to the collaborators that own persistence.
//!
//! The engine never writes through these. Implementations decide how to talk
//! to their backing store; [`MemStore`] serves tests and dataset snapshots.

mod memory;

pub use memory::{Dataset, MemStore};

use crate::types::{
    DevelopmentPlan, EntityId, PerformanceRecord, ResourceRecord, Skill, UserProfile,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user(&self, id: &EntityId) -> Result<Option<UserProfile>>;
    /// Every user of the tenant, the requester included.
    async fn tenant_members(&self, tenant: &EntityId) -> Result<Vec<UserProfile>>;
    /// The administrator account whose settings apply to the whole tenant.
    async fn tenant_admin(&self, tenant: &EntityId) -> Result<Option<UserProfile>>;
}

#[async_trait]
pub trait SkillStore: Send + Sync {
    /// The full skill taxonomy.
    async fn skills(&self) -> Result<Vec<Skill>>;
}

#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn resources_created_by(&self, creators: &[EntityId]) -> Result<Vec<ResourceRecord>>;
}

#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn plans_for_employees(&self, employees: &[EntityId]) -> Result<Vec<DevelopmentPlan>>;
}

#[async_trait]
pub trait PerformanceStore: Send + Sync {
    /// Most recent reports first, at most `limit` of them.
    async fn recent_reports(
        &self,
        employee: &EntityId,
        limit: usize,
    ) -> Result<Vec<PerformanceRecord>>;
}

/// The set of read stores one engine instance queries.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub skills: Arc<dyn SkillStore>,
    pub resources: Arc<dyn ResourceStore>,
    pub plans: Arc<dyn PlanStore>,
    pub performance: Arc<dyn PerformanceStore>,
}

impl Stores {
    /// Use one backing object for every store role.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: UserStore + SkillStore + ResourceStore + PlanStore + PerformanceStore + 'static,
    {
        Self {
            users: store.clone(),
            skills: store.clone(),
            resources: store.clone(),
            plans: store.clone(),
            performance: store,
        }
    }
}
