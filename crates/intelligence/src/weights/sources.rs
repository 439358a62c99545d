use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use super::{WeightConfig, WeightConfigError, WeightSource, WeightTier};
use crate::store::UserStore;
use crate::types::EntityId;

/// Weights an administrator attached to their account for the whole tenant.
pub struct AdminWeightSource {
    users: Arc<dyn UserStore>,
}

impl AdminWeightSource {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl WeightSource for AdminWeightSource {
    fn tier(&self) -> WeightTier {
        WeightTier::Admin
    }

    async fn lookup(&self, tenant: &EntityId) -> Result<Option<WeightConfig>> {
        let Some(admin) = self
            .users
            .tenant_admin(tenant)
            .await
            .context("looking up tenant administrator")?
        else {
            return Ok(None);
        };
        let Some(raw) = admin.recommendation_weights.as_ref() else {
            return Ok(None);
        };
        match WeightConfig::from_json(raw) {
            Ok(config) => Ok(Some(config)),
            Err(WeightConfigError::Empty) => Ok(None),
            Err(err) => Err(anyhow!(err)).with_context(|| {
                format!("admin {} has invalid recommendation weights", admin.id)
            }),
        }
    }
}

/// The legacy weights file, read once when the source is built.
///
/// Lookups only read the cached outcome, so concurrent requests never touch
/// the filesystem. A missing file means "not configured"; an unreadable or
/// malformed one is reported on every lookup so the fall-through is visible.
pub struct LegacyFileWeightSource {
    path: Option<PathBuf>,
    cached: Result<Option<WeightConfig>, String>,
}

impl LegacyFileWeightSource {
    pub fn load(path: Option<PathBuf>) -> Self {
        let cached = match &path {
            None => Ok(None),
            Some(p) => read_weights_file(p).map_err(|e| format!("{e:#}")),
        };
        if let (Some(p), Ok(Some(_))) = (&path, &cached) {
            tracing::debug!(
                target: "skillpath::weights",
                path = %p.display(),
                "Loaded legacy weights file"
            );
        }
        Self { path, cached }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn read_weights_file(path: &Path) -> Result<Option<WeightConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    match WeightConfig::from_json(&value) {
        Ok(config) => Ok(Some(config)),
        Err(WeightConfigError::Empty) => Ok(None),
        Err(err) => Err(anyhow!(err)).with_context(|| format!("validating {}", path.display())),
    }
}

#[async_trait]
impl WeightSource for LegacyFileWeightSource {
    fn tier(&self) -> WeightTier {
        WeightTier::Legacy
    }

    async fn lookup(&self, _tenant: &EntityId) -> Result<Option<WeightConfig>> {
        self.cached.clone().map_err(|e| anyhow!(e))
    }
}
