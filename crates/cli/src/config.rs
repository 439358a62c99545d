//! Configuration file support for skillpath.
//!
//! Loads settings from `~/.skillpath/config.toml` with the following precedence:
//! CLI arguments > Environment variables > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.skillpath/config.toml
//!
//! [oracle]
//! # Base URL of the scoring oracle
//! url = "http://127.0.0.1:8000"
//! # Per-call timeout in milliseconds
//! timeout_ms = 10000
//!
//! [recommend]
//! # Default number of recommendations
//! limit = 10
//! # Legacy weight configuration file
//! weights_file = "/etc/skillpath/recommendation-weights.json"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct OracleConfig {
    pub url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendConfig {
    pub limit: Option<usize>,
    pub weights_file: Option<PathBuf>,
}

/// Returns the path to the config file (~/.skillpath/config.toml).
fn config_path() -> Option<PathBuf> {
    skillpath_state::config_dir()
        .ok()
        .map(|d| d.join("config.toml"))
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist and `Err` if it exists but
/// cannot be read or parsed.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    let content =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

    tracing::debug!(
        target: "skillpath::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Applies configuration file settings to environment variables that are
/// not already set. Call before parsing CLI arguments.
pub fn apply_config_to_env() {
    match load_config() {
        Ok(Some(config)) => apply(&config),
        Ok(None) => {}
        Err(err) => tracing::warn!(
            target: "skillpath::config",
            error = %format!("{err:#}"),
            "Ignoring unreadable configuration file"
        ),
    }
}

fn apply(config: &Config) {
    fn set_if_absent(key: &str, value: &str) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
            tracing::trace!(
                target: "skillpath::config",
                key,
                "Set environment variable from config file"
            );
        }
    }

    if let Some(ref url) = config.oracle.url {
        set_if_absent("SKILLPATH_ORACLE_URL", url);
    }
    if let Some(ms) = config.oracle.timeout_ms {
        set_if_absent("SKILLPATH_ORACLE_TIMEOUT_MS", &ms.to_string());
    }
    if let Some(limit) = config.recommend.limit {
        set_if_absent("SKILLPATH_RECOMMEND_LIMIT", &limit.to_string());
    }
    if let Some(ref file) = config.recommend.weights_file {
        set_if_absent("SKILLPATH_WEIGHTS_FILE", &file.to_string_lossy());
    }
}
