//! Command-line interface for `skillpath`.
//!
//! Loads a dataset snapshot into the in-memory stores and runs the
//! recommendation engine against the configured scoring oracle.

mod app;
mod cli;
mod commands;
mod config;

fn main() -> anyhow::Result<()> {
    app::run()
}
