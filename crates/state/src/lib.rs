//! Runtime settings for skillpath.
//!
//! Every knob is read from the environment so the CLI can layer
//! `~/.skillpath/config.toml` underneath without the library knowing about it.

pub mod env;

pub use env::{
    config_dir, env_default_limit, env_oracle_timeout, env_oracle_url, home_dir,
    legacy_weights_file, DEFAULT_LIMIT, DEFAULT_ORACLE_TIMEOUT_MS, DEFAULT_ORACLE_URL,
};
