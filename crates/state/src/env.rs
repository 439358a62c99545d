use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ORACLE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LIMIT: usize = 10;

const WEIGHTS_FILE_NAME: &str = "recommendation-weights.json";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns `~/.skillpath`, where the config file and legacy weights live.
pub fn config_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".skillpath"))
}

/// Base URL of the scoring oracle from `SKILLPATH_ORACLE_URL`.
pub fn env_oracle_url() -> String {
    std::env::var("SKILLPATH_ORACLE_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_ORACLE_URL.to_string())
}

/// Upper bound on a single oracle call from `SKILLPATH_ORACLE_TIMEOUT_MS`.
///
/// Zero or unparseable values fall back to the default; an unbounded oracle
/// call is never allowed.
pub fn env_oracle_timeout() -> Duration {
    let ms = std::env::var("SKILLPATH_ORACLE_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_ORACLE_TIMEOUT_MS);
    Duration::from_millis(ms)
}

/// Default number of recommendations from `SKILLPATH_RECOMMEND_LIMIT`.
pub fn env_default_limit() -> usize {
    std::env::var("SKILLPATH_RECOMMEND_LIMIT")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

/// Path to the legacy on-disk weight configuration.
///
/// `SKILLPATH_WEIGHTS_FILE` wins; otherwise `~/.skillpath/recommendation-weights.json`.
/// Returns `None` only when no home directory can be determined.
pub fn legacy_weights_file() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var("SKILLPATH_WEIGHTS_FILE") {
        if !custom.trim().is_empty() {
            return Some(PathBuf::from(custom));
        }
    }
    config_dir().ok().map(|d| d.join(WEIGHTS_FILE_NAME))
}
