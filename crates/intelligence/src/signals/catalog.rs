//! Tenant-scoped resource catalog.

use std::collections::{HashMap, HashSet};

use crate::types::{
    is_unresolved_provider, Creator, ResourceCandidate, ResourceRecord, UserProfile,
    UNKNOWN_PROVIDER,
};

/// Provider attribution for a resource: its own provider when it has one,
/// otherwise the creator's display name, otherwise `"Unknown"`.
pub fn resolve_provider(provider: Option<&str>, creator_name: &str) -> String {
    if !is_unresolved_provider(provider) {
        return provider.unwrap_or_default().trim().to_string();
    }
    let name = creator_name.trim();
    if name.is_empty() {
        UNKNOWN_PROVIDER.to_string()
    } else {
        name.to_string()
    }
}

/// Turn raw resource records into candidates for a tenant.
///
/// Only resources created by one of `members` survive, whatever the store
/// returned. Blank ids are dropped and repeated ids keep their first record.
pub fn tenant_catalog(
    members: &[UserProfile],
    resources: Vec<ResourceRecord>,
) -> Vec<ResourceCandidate> {
    let creators: HashMap<_, _> = members.iter().map(|m| (&m.id, m)).collect();
    let mut seen = HashSet::new();
    let mut candidates = Vec::with_capacity(resources.len());

    for record in resources {
        let Some(creator) = creators.get(&record.created_by) else {
            tracing::warn!(
                target: "skillpath::signals",
                resource = %record.id,
                creator = %record.created_by,
                "Dropping resource created outside the tenant"
            );
            continue;
        };
        if record.id.is_empty() || !seen.insert(record.id.clone()) {
            continue;
        }
        candidates.push(ResourceCandidate {
            provider: resolve_provider(record.provider.as_deref(), &creator.name),
            id: record.id,
            title: record.title,
            kind: record.kind,
            url: record.url,
            duration: record.duration,
            difficulty: record.difficulty,
            skill_id: record.skill_id,
            created_by: Creator {
                id: creator.id.clone(),
                name: creator.name.clone(),
            },
        });
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityId;

    fn member(id: &str, tenant: &str, name: &str) -> UserProfile {
        UserProfile {
            id: EntityId::new(id),
            tenant_id: EntityId::new(tenant),
            name: name.to_string(),
            role: None,
            is_admin: false,
            skills: vec![],
            recommendation_weights: None,
        }
    }

    fn record(id: &str, provider: Option<&str>, creator: &str) -> ResourceRecord {
        ResourceRecord {
            id: EntityId::new(id),
            title: format!("Resource {id}"),
            provider: provider.map(str::to_string),
            kind: Some("course".into()),
            url: None,
            duration: None,
            difficulty: None,
            skill_id: Some(EntityId::new("s1")),
            created_by: EntityId::new(creator),
        }
    }

    #[test]
    fn test_resolve_provider_prefers_real_provider() {
        assert_eq!(resolve_provider(Some(" Udemy "), "Dana"), "Udemy");
    }

    #[test]
    fn test_resolve_provider_backfills_creator_name() {
        assert_eq!(resolve_provider(Some("Unknown"), "Dana"), "Dana");
        assert_eq!(resolve_provider(None, "Dana"), "Dana");
    }

    #[test]
    fn test_resolve_provider_keeps_sentinel_without_creator_name() {
        assert_eq!(resolve_provider(None, "  "), UNKNOWN_PROVIDER);
    }

    #[test]
    fn test_catalog_excludes_other_tenants() {
        let members = vec![member("a1", "acme", "Dana")];
        let resources = vec![
            record("r1", Some("Pluralsight"), "a1"),
            // Same skill, created in another tenant.
            record("r2", Some("Pluralsight"), "g1"),
        ];
        let catalog = tenant_catalog(&members, resources);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id.as_str(), "r1");
    }

    #[test]
    fn test_catalog_applies_provider_backfill_and_creator() {
        let members = vec![member("a1", "acme", "Dana")];
        let catalog = tenant_catalog(&members, vec![record("r1", Some("Unknown"), "a1")]);
        assert_eq!(catalog[0].provider, "Dana");
        assert_eq!(catalog[0].created_by.name, "Dana");
    }

    #[test]
    fn test_catalog_drops_duplicate_and_blank_ids() {
        let members = vec![member("a1", "acme", "Dana")];
        let catalog = tenant_catalog(
            &members,
            vec![
                record("r1", Some("A"), "a1"),
                record(" r1 ", Some("B"), "a1"),
                record("  ", Some("C"), "a1"),
            ],
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].provider, "A");
    }
}
