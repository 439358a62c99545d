//! CLI command handlers for the skillpath application.

mod health;
mod recommend;
mod weights;

pub(crate) use health::handle_oracle_health_command;
pub(crate) use recommend::handle_recommend_command;
pub(crate) use weights::handle_weights_command;

use anyhow::{bail, Context, Result};
use skillpath_intelligence::{EngineSettings, MemStore, Stores};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Oracle flags that override environment settings.
#[derive(Debug, Default, Clone)]
pub(crate) struct OracleOverrides {
    pub url: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl OracleOverrides {
    pub(crate) fn apply(self, mut settings: EngineSettings) -> EngineSettings {
        if let Some(url) = self.url {
            settings.oracle_url = url;
        }
        if let Some(ms) = self.timeout_ms.filter(|ms| *ms > 0) {
            settings.oracle_timeout = Duration::from_millis(ms);
        }
        settings
    }
}

pub(crate) fn load_stores(data: &Path) -> Result<Stores> {
    let store = MemStore::from_json_file(data)
        .with_context(|| format!("loading dataset {}", data.display()))?;
    Ok(Stores::shared(Arc::new(store)))
}

pub(crate) fn check_format(format: &str) -> Result<bool> {
    match format {
        "json" => Ok(true),
        "text" => Ok(false),
        other => bail!("unsupported format {other:?}: expected text or json"),
    }
}
