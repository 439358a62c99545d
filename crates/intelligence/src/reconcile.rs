//! Result Reconciler: the last pass before a response leaves the engine.
//!
//! Oracle and fallback output both arrive here as [`ReconcileItem`]s and
//! leave as one contract. Only resources from the tenant catalog survive,
//! providers and authors are backfilled from it, and identifiers are unique
//! in first-seen order.

use std::collections::{HashMap, HashSet};

use crate::types::{is_unresolved_provider, EntityId, Recommendation, ResourceCandidate};

/// A recommendation plus every identifier its source attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileItem {
    pub recommendation: Recommendation,
    /// Canonical id first. Duplicates are detected across all of them.
    pub identifiers: Vec<EntityId>,
}

/// Drop items outside the catalog, backfill from the catalog, then drop
/// repeated resources.
///
/// Truncation to the limit happens before this, so the result may be shorter
/// than the limit. It is never refilled.
pub fn reconcile(
    items: Vec<ReconcileItem>,
    candidates: &[ResourceCandidate],
) -> Vec<Recommendation> {
    let catalog: HashMap<&EntityId, &ResourceCandidate> =
        candidates.iter().map(|c| (&c.id, c)).collect();

    let mut seen: HashSet<EntityId> = HashSet::new();
    let mut out = Vec::with_capacity(items.len());

    for item in items {
        let ReconcileItem {
            mut recommendation,
            mut identifiers,
        } = item;
        if identifiers.is_empty() {
            identifiers.push(recommendation.resource_id.clone());
        }

        let Some(candidate) = identifiers.iter().find_map(|id| catalog.get(id)) else {
            tracing::warn!(
                target: "skillpath::engine",
                resource = %recommendation.resource_id,
                "Recommendation is not in the tenant catalog; dropping"
            );
            continue;
        };

        if is_unresolved_provider(Some(recommendation.provider.as_str())) {
            recommendation.provider = candidate.provider.clone();
        }
        if recommendation
            .author
            .as_deref()
            .map_or(true, |a| a.trim().is_empty())
        {
            let creator = candidate.created_by.name.trim();
            recommendation.author = (!creator.is_empty()).then(|| creator.to_string());
        }

        if identifiers.iter().any(|id| seen.contains(id)) {
            tracing::debug!(
                target: "skillpath::engine",
                resource = %recommendation.resource_id,
                "Dropping duplicate recommendation"
            );
            continue;
        }
        seen.extend(identifiers);
        out.push(recommendation);
    }

    out
}
