//! What the scoring oracle sends back.

use serde::Deserialize;

use crate::reconcile::ReconcileItem;
use crate::types::{
    is_unresolved_provider, lossy_opt_string, EntityId, Recommendation, UNKNOWN_PROVIDER,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OracleResponse {
    pub recommendations: Vec<OracleItem>,
}

/// One scored resource. The oracle names the identifier `resourceId`, `_id`
/// or `id` depending on where the record came from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OracleItem {
    #[serde(rename = "resourceId", default)]
    pub resource_id: Option<EntityId>,
    #[serde(rename = "_id", default)]
    pub underscore_id: Option<EntityId>,
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "lossy_opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lossy_opt_string")]
    pub provider: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lossy_opt_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lossy_opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lossy_opt_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lossy_opt_string")]
    pub author: Option<String>,
}

impl OracleItem {
    /// Every non-blank identifier the item carries, in priority order
    /// `resourceId`, `_id`, `id`, without repeats.
    pub fn identifiers(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = Vec::with_capacity(3);
        for id in [&self.resource_id, &self.underscore_id, &self.id]
            .into_iter()
            .flatten()
        {
            if !id.is_empty() && !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// The identifier downstream code uses for this item.
    pub fn canonical_id(&self) -> Option<EntityId> {
        self.identifiers().into_iter().next()
    }

    /// Convert into the response shape. Items with no identifier cannot be
    /// deduplicated or linked to a resource and yield `None`.
    pub fn into_reconcile_item(self) -> Option<ReconcileItem> {
        let identifiers = self.identifiers();
        let resource_id = identifiers.first()?.clone();
        let provider = if is_unresolved_provider(self.provider.as_deref()) {
            UNKNOWN_PROVIDER.to_string()
        } else {
            self.provider.unwrap_or_default().trim().to_string()
        };
        Some(ReconcileItem {
            recommendation: Recommendation {
                resource_id,
                title: self.title.unwrap_or_default(),
                provider,
                kind: self.kind,
                url: self.url,
                duration: self.duration,
                author: self.author,
            },
            identifiers,
        })
    }
}
