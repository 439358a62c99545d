use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{PerformanceStore, PlanStore, ResourceStore, SkillStore, UserStore};
use crate::types::{
    DevelopmentPlan, EntityId, PerformanceRecord, ResourceRecord, Skill, UserProfile,
};

/// A snapshot of every collaborator store, as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
    #[serde(default)]
    pub plans: Vec<DevelopmentPlan>,
    #[serde(default)]
    pub performance: Vec<PerformanceRecord>,
}

impl Dataset {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading dataset {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing dataset {}", path.display()))
    }
}

/// Read-only in-memory store for tests and dataset snapshots.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    data: Dataset,
}

impl MemStore {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        Ok(Self::new(Dataset::from_json_file(path)?))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn user(&self, id: &EntityId) -> Result<Option<UserProfile>> {
        Ok(self.data.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn tenant_members(&self, tenant: &EntityId) -> Result<Vec<UserProfile>> {
        Ok(self
            .data
            .users
            .iter()
            .filter(|u| &u.tenant_id == tenant)
            .cloned()
            .collect())
    }

    async fn tenant_admin(&self, tenant: &EntityId) -> Result<Option<UserProfile>> {
        Ok(self
            .data
            .users
            .iter()
            .find(|u| u.is_admin && &u.tenant_id == tenant)
            .cloned())
    }
}

#[async_trait]
impl SkillStore for MemStore {
    async fn skills(&self) -> Result<Vec<Skill>> {
        Ok(self.data.skills.clone())
    }
}

#[async_trait]
impl ResourceStore for MemStore {
    async fn resources_created_by(&self, creators: &[EntityId]) -> Result<Vec<ResourceRecord>> {
        Ok(self
            .data
            .resources
            .iter()
            .filter(|r| creators.contains(&r.created_by))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PlanStore for MemStore {
    async fn plans_for_employees(&self, employees: &[EntityId]) -> Result<Vec<DevelopmentPlan>> {
        Ok(self
            .data
            .plans
            .iter()
            .filter(|p| employees.contains(&p.employee_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PerformanceStore for MemStore {
    async fn recent_reports(
        &self,
        employee: &EntityId,
        limit: usize,
    ) -> Result<Vec<PerformanceRecord>> {
        let mut reports: Vec<_> = self
            .data
            .performance
            .iter()
            .filter(|r| &r.employee_id == employee)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports.truncate(limit);
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Dataset {
        serde_json::from_value(json!({
            "users": [
                {"id": "a1", "tenantId": "acme", "name": "Ada", "isAdmin": true},
                {"id": "a2", "tenantId": "acme", "name": "Bo"},
                {"id": "g1", "tenantId": "globex", "name": "Gil", "isAdmin": true}
            ],
            "resources": [
                {"id": "r1", "title": "Rust", "createdBy": "a2"},
                {"id": "r2", "title": "Go", "createdBy": "g1"}
            ],
            "performance": [
                {"_id": "p1", "employeeId": "a2", "createdAt": "2024-01-01T00:00:00Z", "rating": 3},
                {"_id": "p2", "employeeId": "a2", "createdAt": "2024-06-01T00:00:00Z", "rating": 4},
                {"_id": "p3", "employeeId": "a2", "createdAt": "2024-03-01T00:00:00Z"}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_tenant_queries_are_scoped() {
        let store = MemStore::new(dataset());
        let acme = EntityId::new("acme");

        let members = store.tenant_members(&acme).await.unwrap();
        assert_eq!(members.len(), 2);

        let admin = store.tenant_admin(&acme).await.unwrap().unwrap();
        assert_eq!(admin.id.as_str(), "a1");

        let ids: Vec<_> = members.into_iter().map(|m| m.id).collect();
        let resources = store.resources_created_by(&ids).await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id.as_str(), "r1");
    }

    #[tokio::test]
    async fn test_recent_reports_are_newest_first_and_bounded() {
        let store = MemStore::new(dataset());
        let reports = store
            .recent_reports(&EntityId::new("a2"), 2)
            .await
            .unwrap();
        let ids: Vec<_> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3"]);
        assert_eq!(reports[0].details.get("rating"), Some(&json!(4)));
    }

    #[test]
    fn test_dataset_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, serde_json::to_string(&dataset()).unwrap()).unwrap();

        let store = MemStore::from_json_file(&path).unwrap();
        assert_eq!(store.dataset().users.len(), 3);
    }

    #[test]
    fn test_dataset_from_bad_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = MemStore::from_json_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
