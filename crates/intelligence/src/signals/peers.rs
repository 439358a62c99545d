//! Collaborative signal from same-tenant colleagues.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::{dedup_skill_levels, DevelopmentPlan, EntityId, PeerProfile, UserProfile};

/// Build the peer set for `requester`.
///
/// Consumed resources come from the peers' approved or completed plans,
/// collected per employee into a set. Peers with no skills and no consumed
/// resources are left out. Output follows the order of `members`.
pub fn build_peer_profiles(
    requester: &EntityId,
    members: &[UserProfile],
    plans: &[DevelopmentPlan],
) -> Vec<PeerProfile> {
    let peer_ids: HashSet<&EntityId> = members
        .iter()
        .map(|m| &m.id)
        .filter(|id| *id != requester)
        .collect();

    let mut consumed: HashMap<&EntityId, BTreeSet<EntityId>> = HashMap::new();
    for plan in plans {
        if !plan.status.is_consumed() || !peer_ids.contains(&plan.employee_id) {
            continue;
        }
        consumed.entry(&plan.employee_id).or_default().extend(
            plan.recommended_resources
                .iter()
                .filter(|r| !r.is_empty())
                .cloned(),
        );
    }

    let mut emitted: HashSet<EntityId> = HashSet::new();
    let mut peers = Vec::new();
    for member in members {
        if !peer_ids.contains(&member.id) || !emitted.insert(member.id.clone()) {
            continue;
        }
        let peer = PeerProfile {
            user_id: member.id.clone(),
            skills: dedup_skill_levels(member.skills.clone()),
            resources: consumed.remove(&member.id).unwrap_or_default(),
        };
        if peer.carries_signal() {
            peers.push(peer);
        }
    }
    peers
}
