//! Read-only views of the records a recommendation request touches.
//!
//! Nothing here is persisted by the engine; the stores hand these out per
//! request and they are dropped when the request completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Provider value the catalog uses when nobody filled the field in.
pub const UNKNOWN_PROVIDER: &str = "Unknown";

/// Canonical string identifier.
///
/// Every identifier entering the pipeline goes through [`EntityId::new`], so
/// equality, hashing and deduplication all compare the same normal form:
/// surrounding whitespace is dropped, UUIDs are rendered lowercase-hyphenated
/// and 24-digit hex object ids are lowercased. Numeric ids from a store are
/// accepted and rendered as decimal strings.
///
/// # Examples
///
/// ```
/// use skillpath_intelligence::EntityId;
///
/// let a = EntityId::new(" 6F1C2B3A4D5E6F7A8B9C0D1E ");
/// assert_eq!(a.as_str(), "6f1c2b3a4d5e6f7a8b9c0d1e");
///
/// let u = EntityId::new("{67E55044-10B1-426F-9247-BB680E5FE0C8}");
/// assert_eq!(u.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Normalize a raw identifier.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if let Ok(uuid) = uuid::Uuid::parse_str(trimmed) {
            return Self(uuid.hyphenated().to_string());
        }
        if trimmed.len() == 24 && trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self(trimmed.to_ascii_lowercase());
        }
        Self(trimmed.to_string())
    }

    /// Borrow the canonical form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for ids that were blank before normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for EntityId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<uuid::Uuid> for EntityId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id.hyphenated().to_string())
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<RawId> for EntityId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self::new(s),
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Signed(n) => Self(n.to_string()),
        }
    }
}

/// Accept a string or a bare number for free-form text fields such as
/// `duration`, which stores and the oracle fill in inconsistently.
pub(crate) fn lossy_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// True when a provider value carries no attribution.
pub fn is_unresolved_provider(provider: Option<&str>) -> bool {
    match provider.map(str::trim) {
        None => true,
        Some(p) => p.is_empty() || p.eq_ignore_ascii_case(UNKNOWN_PROVIDER),
    }
}

/// A user's level in one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevel {
    pub skill_id: EntityId,
    pub level: u8,
}

/// A skill the caller wants to grow, with the level they are aiming for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSkill {
    pub skill_id: EntityId,
    pub target_level: u8,
}

/// An entry of the global skill taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An employee as the user store sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub tenant_id: EntityId,
    #[serde(default)]
    pub name: String,
    /// Role tag forwarded to the oracle as the persona (e.g. `manager`).
    #[serde(default)]
    pub role: Option<String>,
    /// Tenant administrators carry the tenant's weight configuration.
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub skills: Vec<SkillLevel>,
    /// Raw admin-configured weights; validated by the weight resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_weights: Option<serde_json::Value>,
}

/// Lifecycle state of a development plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Draft,
    Pending,
    Approved,
    Completed,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl PlanStatus {
    /// Plans whose goals may feed the goal text.
    pub fn is_goal_source(self) -> bool {
        matches!(self, Self::Draft | Self::Pending | Self::Approved)
    }

    /// Plans whose recommended resources count as consumed by the employee.
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Approved | Self::Completed)
    }
}

/// An individual development plan (IDP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentPlan {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub employee_id: EntityId,
    pub status: PlanStatus,
    #[serde(default)]
    pub goals: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub recommended_resources: Vec<EntityId>,
}

/// A performance report. Only the identifiers and timestamp are interpreted;
/// everything else is forwarded to the oracle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    pub employee_id: EntityId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// A learning resource as stored, before tenant scoping and provider backfill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lossy_opt_string")]
    pub duration: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub skill_id: Option<EntityId>,
    pub created_by: EntityId,
}

/// Who created a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
}

/// A tenant-scoped resource with its provider attribution resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCandidate {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    pub provider: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<EntityId>,
    pub created_by: Creator,
}

/// Collaborative signal contributed by one same-tenant colleague.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerProfile {
    pub user_id: EntityId,
    pub skills: Vec<SkillLevel>,
    /// Resources from the peer's approved or completed plans.
    pub resources: BTreeSet<EntityId>,
}

impl PeerProfile {
    /// A peer with neither skills nor consumed resources tells us nothing.
    pub fn carries_signal(&self) -> bool {
        !self.skills.is_empty() || !self.resources.is_empty()
    }
}

/// One entry of the response contract. Both the oracle path and the fallback
/// path produce exactly this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub resource_id: EntityId,
    pub title: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
    pub duration: Option<String>,
    pub author: Option<String>,
}

/// Final response of a recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResult {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// Keep the first entry for each skill id.
pub(crate) fn dedup_skill_levels(levels: Vec<SkillLevel>) -> Vec<SkillLevel> {
    let mut seen = BTreeSet::new();
    levels
        .into_iter()
        .filter(|s| !s.skill_id.is_empty() && seen.insert(s.skill_id.clone()))
        .collect()
}
