//! CLI handler for the `oracle-health` command.

use anyhow::{bail, Result};
use skillpath_intelligence::{EngineSettings, HttpScoringOracle, ScoringOracle};

use super::{check_format, OracleOverrides};

/// Handle the `oracle-health` command. Fails when the oracle cannot be reached.
pub(crate) async fn handle_oracle_health_command(
    overrides: OracleOverrides,
    format: String,
) -> Result<()> {
    let json = check_format(&format)?;
    let settings = overrides.apply(EngineSettings::from_env());
    let oracle = HttpScoringOracle::new(&settings.oracle_url, settings.oracle_timeout)?;

    match oracle.health().await {
        Ok(health) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else {
                println!(
                    "Oracle at {} is {} ({} {})",
                    oracle.base_url(),
                    health.status,
                    health.service.as_deref().unwrap_or("unknown service"),
                    health.version.as_deref().unwrap_or("unknown version"),
                );
            }
            if !health.is_healthy() {
                bail!("oracle reported status {:?}", health.status);
            }
            Ok(())
        }
        Err(err) => bail!("oracle at {} unavailable: {err}", oracle.base_url()),
    }
}
