//! The request body the scoring oracle reads.

use std::collections::HashMap;

use serde::Serialize;

use crate::signals::SignalBundle;
use crate::types::{
    EntityId, PeerProfile, PerformanceRecord, ResourceCandidate, Skill, SkillLevel, TargetSkill,
};
use crate::weights::WeightConfig;

/// Skill reference attached to each resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRef {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
}

/// A candidate as the oracle sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleResource {
    #[serde(flatten)]
    pub candidate: ResourceCandidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<SkillRef>,
}

/// Canonical payload for `POST /recommend/resources`. Every identifier in it
/// is an [`EntityId`] and serializes as a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleRequest {
    pub user_skills: Vec<SkillLevel>,
    pub skills_to_improve: Vec<TargetSkill>,
    pub performance_reports: Vec<PerformanceRecord>,
    pub resources: Vec<OracleResource>,
    pub skills: Vec<Skill>,
    pub peer_data: Vec<PeerProfile>,
    pub limit: usize,
    pub persona: String,
    pub custom_weights: WeightConfig,
    pub goal_text: String,
}

/// Assemble the oracle payload from aggregated signals.
///
/// Target skills keep the caller's order; repeated skill ids keep the first.
pub fn build_request(
    bundle: &SignalBundle,
    targets: &[TargetSkill],
    weights: &WeightConfig,
    limit: usize,
) -> OracleRequest {
    let names: HashMap<&EntityId, &str> = bundle
        .taxonomy
        .iter()
        .map(|s| (&s.id, s.name.as_str()))
        .collect();

    let resources = bundle
        .candidates
        .iter()
        .map(|c| OracleResource {
            skill: c.skill_id.as_ref().map(|id| SkillRef {
                id: id.clone(),
                name: names.get(id).copied().unwrap_or_default().to_string(),
            }),
            candidate: c.clone(),
        })
        .collect();

    let mut seen = std::collections::HashSet::new();
    let skills_to_improve = targets
        .iter()
        .filter(|t| !t.skill_id.is_empty() && seen.insert(t.skill_id.clone()))
        .cloned()
        .collect();

    OracleRequest {
        user_skills: bundle.self_skills.clone(),
        skills_to_improve,
        performance_reports: bundle.performance.clone(),
        resources,
        skills: bundle.taxonomy.clone(),
        peer_data: bundle.peers.clone(),
        limit,
        persona: bundle.persona().to_string(),
        custom_weights: weights.clone(),
        goal_text: bundle.goal_text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemStore, Stores};
    use crate::signals::SignalAggregator;
    use crate::test_support::sample_dataset;
    use serde_json::json;
    use std::sync::Arc;

    async fn bundle() -> SignalBundle {
        SignalAggregator::new(Stores::shared(Arc::new(MemStore::new(sample_dataset()))))
            .aggregate(&EntityId::new("emp-1"), &EntityId::new("acme"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_payload_field_names_match_oracle_contract() {
        let request = build_request(&bundle().await, &[], &WeightConfig::defaults(), 10);
        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "user_skills",
            "skills_to_improve",
            "performance_reports",
            "resources",
            "skills",
            "peer_data",
            "limit",
            "persona",
            "custom_weights",
            "goal_text",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(value["user_skills"], json!([{"skillId": "s1", "level": 2}]));
        assert_eq!(value["custom_weights"]["skill_gap"], json!(0.3));
        assert_eq!(value["goal_text"], json!("become a full stack developer"));
    }

    #[tokio::test]
    async fn test_resources_carry_string_ids_and_skill_ref() {
        let request = build_request(&bundle().await, &[], &WeightConfig::defaults(), 10);
        let value = serde_json::to_value(&request).unwrap();
        let r1 = value["resources"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["_id"] == json!("r1"))
            .unwrap();
        assert_eq!(r1["skill"], json!({"_id": "s1", "name": "Rust"}));
        assert_eq!(r1["provider"], json!("Dana"));
        assert_eq!(r1["createdBy"], json!({"_id": "dana", "name": "Dana"}));
    }

    #[tokio::test]
    async fn test_peer_resources_serialize_as_list() {
        let request = build_request(&bundle().await, &[], &WeightConfig::defaults(), 10);
        let value = serde_json::to_value(&request).unwrap();
        let peer2 = value["peer_data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["userId"] == json!("peer-2"))
            .unwrap();
        assert_eq!(peer2["resources"], json!(["r2"]));
    }

    #[tokio::test]
    async fn test_targets_are_forwarded_once_each() {
        let targets = vec![
            TargetSkill {
                skill_id: "s2".into(),
                target_level: 4,
            },
            TargetSkill {
                skill_id: "s2".into(),
                target_level: 5,
            },
        ];
        let request = build_request(&bundle().await, &targets, &WeightConfig::defaults(), 3);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["skills_to_improve"],
            json!([{"skillId": "s2", "targetLevel": 4}])
        );
        assert_eq!(value["limit"], json!(3));
        assert_eq!(value["persona"], json!("employee"));
    }
}
