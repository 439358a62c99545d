use clap::{Parser, Subcommand};
use skillpath_intelligence::TargetSkill;
use std::path::PathBuf;

/// Command-line interface for the `skillpath` application.
#[derive(Debug, Parser)]
#[command(
    name = "skillpath",
    about = "Learning resource recommendations from skills, goals, performance and peers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `skillpath` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recommends learning resources for one employee.
    Recommend {
        /// Dataset snapshot (JSON) holding users, skills, resources, plans and reports.
        #[arg(long, env = "SKILLPATH_DATA", value_name = "FILE")]
        data: PathBuf,
        /// Requesting employee id.
        #[arg(long)]
        user: String,
        /// Tenant the employee belongs to.
        #[arg(long)]
        tenant: String,
        /// Skill to improve with its target level (repeatable).
        #[arg(long = "target", value_name = "SKILL:LEVEL", value_parser = parse_target)]
        targets: Vec<TargetSkill>,
        /// Number of recommendations (overrides `SKILLPATH_RECOMMEND_LIMIT`).
        #[arg(long)]
        limit: Option<usize>,
        /// Scoring oracle base URL (overrides `SKILLPATH_ORACLE_URL`).
        #[arg(long, value_name = "URL")]
        oracle_url: Option<String>,
        /// Oracle timeout in milliseconds (overrides `SKILLPATH_ORACLE_TIMEOUT_MS`).
        #[arg(long, value_name = "MILLIS")]
        timeout_ms: Option<u64>,
        /// Output format: text or json.
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Shows the weight configuration a tenant resolves to and where it came from.
    Weights {
        /// Dataset snapshot (JSON).
        #[arg(long, env = "SKILLPATH_DATA", value_name = "FILE")]
        data: PathBuf,
        /// Tenant to resolve weights for.
        #[arg(long)]
        tenant: String,
        /// Output format: text or json.
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Checks whether the scoring oracle is reachable.
    OracleHealth {
        /// Scoring oracle base URL (overrides `SKILLPATH_ORACLE_URL`).
        #[arg(long, value_name = "URL")]
        oracle_url: Option<String>,
        /// Oracle timeout in milliseconds (overrides `SKILLPATH_ORACLE_TIMEOUT_MS`).
        #[arg(long, value_name = "MILLIS")]
        timeout_ms: Option<u64>,
        /// Output format: text or json.
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Parse `skill:level`. The split is on the last colon so skill ids may contain colons.
fn parse_target(raw: &str) -> Result<TargetSkill, String> {
    let (skill, level) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected SKILL:LEVEL, got {raw:?}"))?;
    if skill.trim().is_empty() {
        return Err(format!("missing skill id in {raw:?}"));
    }
    let target_level = level
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid level in {raw:?}: {e}"))?;
    Ok(TargetSkill {
        skill_id: skill.into(),
        target_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_target_accepts_skill_and_level() {
        let t = parse_target("s2:4").unwrap();
        assert_eq!(t.skill_id.as_str(), "s2");
        assert_eq!(t.target_level, 4);
    }

    #[test]
    fn parse_target_splits_on_last_colon() {
        let t = parse_target("org:rust:3").unwrap();
        assert_eq!(t.skill_id.as_str(), "org:rust");
    }

    #[test]
    fn parse_target_rejects_bad_input() {
        assert!(parse_target("s2").is_err());
        assert!(parse_target(":3").is_err());
        assert!(parse_target("s2:high").is_err());
    }

    #[test]
    fn recommend_collects_repeated_targets() {
        let cli = Cli::try_parse_from([
            "skillpath",
            "recommend",
            "--data",
            "data.json",
            "--user",
            "emp",
            "--tenant",
            "acme",
            "--target",
            "s1:3",
            "--target",
            "s2:4",
            "--limit",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Recommend { targets, limit, .. } => {
                assert_eq!(targets.len(), 2);
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
