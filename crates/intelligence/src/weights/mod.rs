//! Tenant weight configuration and its three-tier resolution.
//!
//! Tiers are tried in order: the tenant administrator's settings, the legacy
//! weights file, then the built-in defaults. The first tier that produces a
//! configuration wins outright; tiers are never merged.

mod sources;

pub use sources::{AdminWeightSource, LegacyFileWeightSource};

use crate::store::UserStore;
use crate::types::EntityId;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Named signals the oracle blends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    SkillGap,
    SkillRelevance,
    DifficultyMatch,
    Collaborative,
    ResourceType,
    SkillSimilarity,
}

impl SignalCategory {
    pub const ALL: [SignalCategory; 6] = [
        Self::SkillGap,
        Self::SkillRelevance,
        Self::DifficultyMatch,
        Self::Collaborative,
        Self::ResourceType,
        Self::SkillSimilarity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::SkillGap => "skill_gap",
            Self::SkillRelevance => "skill_relevance",
            Self::DifficultyMatch => "difficulty_match",
            Self::Collaborative => "collaborative",
            Self::ResourceType => "resource_type",
            Self::SkillSimilarity => "skill_similarity",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// A non-negative, finite weight.
///
/// # Examples
///
/// ```
/// use skillpath_intelligence::Weight;
///
/// assert_eq!(Weight::new(0.25).map(|w| w.value()), Some(0.25));
/// assert!(Weight::new(-0.1).is_none());
/// assert!(Weight::new(f64::NAN).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Why a candidate weight configuration was rejected.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightConfigError {
    #[error("weight configuration must be a JSON object")]
    NotAnObject,
    #[error("weight configuration names no known signal category")]
    Empty,
    #[error("weight for '{key}' must be a non-negative number, got {value}")]
    InvalidWeight { key: String, value: String },
}

/// Mapping of signal categories to weights, forwarded to the oracle as
/// `custom_weights`. Weights need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightConfig {
    weights: BTreeMap<SignalCategory, Weight>,
}

impl WeightConfig {
    /// Built-in defaults, used when neither the tenant nor the legacy file
    /// configure anything.
    pub fn defaults() -> Self {
        Self::from_pairs([
            (SignalCategory::SkillGap, 0.30),
            (SignalCategory::SkillRelevance, 0.20),
            (SignalCategory::DifficultyMatch, 0.15),
            (SignalCategory::Collaborative, 0.15),
            (SignalCategory::ResourceType, 0.10),
            (SignalCategory::SkillSimilarity, 0.10),
        ])
    }

    /// Build from known-good pairs; invalid weights are skipped.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (SignalCategory, f64)>) -> Self {
        Self {
            weights: pairs
                .into_iter()
                .filter_map(|(c, v)| Weight::new(v).map(|w| (c, w)))
                .collect(),
        }
    }

    /// Validate a configuration coming from outside the process.
    ///
    /// Accepts either a bare object (`{"skill_gap": 0.4, ...}`) or one wrapped
    /// as `{"weights": {...}}`. Unknown keys are ignored; a known key with a
    /// negative or non-numeric value rejects the whole configuration.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, WeightConfigError> {
        let object = value.as_object().ok_or(WeightConfigError::NotAnObject)?;
        let object = match object.get("weights").and_then(|w| w.as_object()) {
            Some(inner) => inner,
            None => object,
        };

        let mut weights = BTreeMap::new();
        for (key, raw) in object {
            let Some(category) = SignalCategory::from_key(key) else {
                tracing::debug!(
                    target: "skillpath::weights",
                    key = %key,
                    "Ignoring unknown weight category"
                );
                continue;
            };
            let weight = raw.as_f64().and_then(Weight::new).ok_or_else(|| {
                WeightConfigError::InvalidWeight {
                    key: key.clone(),
                    value: raw.to_string(),
                }
            })?;
            weights.insert(category, weight);
        }

        if weights.is_empty() {
            return Err(WeightConfigError::Empty);
        }
        Ok(Self { weights })
    }

    /// Weight for a category; categories the configuration leaves out are 0.
    pub fn get(&self, category: SignalCategory) -> f64 {
        self.weights.get(&category).map(Weight::value).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignalCategory, f64)> + '_ {
        self.weights.iter().map(|(c, w)| (*c, w.value()))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.weights.values().map(Weight::value).sum()
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl<'de> Deserialize<'de> for WeightConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Which tier produced a resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightTier {
    Admin,
    Legacy,
    Default,
}

impl fmt::Display for WeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::Legacy => "legacy",
            Self::Default => "default",
        })
    }
}

/// One fallible tier of weight lookup.
///
/// `Ok(None)` means the tier has nothing configured for the tenant; `Err`
/// means the tier could not be consulted. The resolver treats both as
/// "try the next tier".
#[async_trait]
pub trait WeightSource: Send + Sync {
    fn tier(&self) -> WeightTier;
    async fn lookup(&self, tenant: &EntityId) -> Result<Option<WeightConfig>>;
}

/// Resolves the active weights for a tenant. Never fails.
#[derive(Clone)]
pub struct WeightResolver {
    sources: Vec<Arc<dyn WeightSource>>,
}

impl WeightResolver {
    /// Admin tier backed by `users`, then the legacy file at `legacy_path`.
    pub fn new(users: Arc<dyn UserStore>, legacy_path: Option<PathBuf>) -> Self {
        Self::with_sources(vec![
            Arc::new(AdminWeightSource::new(users)),
            Arc::new(LegacyFileWeightSource::load(legacy_path)),
        ])
    }

    /// Custom ordered tiers; defaults always back the last one.
    pub fn with_sources(sources: Vec<Arc<dyn WeightSource>>) -> Self {
        Self { sources }
    }

    pub async fn resolve_weights(&self, tenant: &EntityId) -> WeightConfig {
        self.resolve_with_tier(tenant).await.0
    }

    pub async fn resolve_with_tier(&self, tenant: &EntityId) -> (WeightConfig, WeightTier) {
        for source in &self.sources {
            match source.lookup(tenant).await {
                Ok(Some(config)) => {
                    tracing::debug!(
                        target: "skillpath::weights",
                        tenant = %tenant,
                        tier = %source.tier(),
                        "Resolved weight configuration"
                    );
                    return (config, source.tier());
                }
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(
                        target: "skillpath::weights",
                        tenant = %tenant,
                        tier = %source.tier(),
                        error = %format!("{err:#}"),
                        "Weight tier unavailable; falling through"
                    );
                }
            }
        }
        (WeightConfig::defaults(), WeightTier::Default)
    }
}
