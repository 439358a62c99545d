use anyhow::Result;
use clap::Parser;
use tokio::runtime::Runtime;

use crate::cli::{Cli, Commands};
use crate::commands::{
    handle_oracle_health_command, handle_recommend_command, handle_weights_command,
    OracleOverrides,
};

/// The main entry point for the `skillpath` binary.
pub fn run() -> Result<()> {
    // Logs go to stderr so `--format json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    crate::config::apply_config_to_env();
    let cli = Cli::parse();
    let rt = Runtime::new()?;

    match cli.command {
        Commands::Recommend {
            data,
            user,
            tenant,
            targets,
            limit,
            oracle_url,
            timeout_ms,
            format,
        } => rt.block_on(handle_recommend_command(
            data,
            user,
            tenant,
            targets,
            limit,
            OracleOverrides {
                url: oracle_url,
                timeout_ms,
            },
            format,
        )),
        Commands::Weights {
            data,
            tenant,
            format,
        } => rt.block_on(handle_weights_command(data, tenant, format)),
        Commands::OracleHealth {
            oracle_url,
            timeout_ms,
            format,
        } => rt.block_on(handle_oracle_health_command(
            OracleOverrides {
                url: oracle_url,
                timeout_ms,
            },
            format,
        )),
    }
}
