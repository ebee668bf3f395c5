#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;

use crate::handlers::{env, infra, init, tokens};
use crate::models::args::{AppCommands, Cli};

use anyhow::{Context, Result};
use clap::Parser;
use zk_kernel::config::load_config;
use zk_kernel::tokens::NewToken;
use zk_logger::Logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).verbosity(cli.verbose);
    if let Some(dir) = &cli.log_dir {
        logger = logger.path(dir);
    }
    if cli.log_json {
        logger = logger.json();
    }
    if let Some(filter) = &cli.log_filter {
        logger = logger.env_filter(filter.as_str());
    }
    let log = logger.init()?;
    if log.guard().is_some() {
        tracing::debug!(dir = ?cli.log_dir, "File logging enabled");
    }

    let mut config =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    config.ci |= ci_detected();
    tracing::debug!(ci = config.ci, "Configuration loaded");

    match cli.command {
        AppCommands::Init {} => init::run_init(&config)?,
        AppCommands::Plan {} => init::print_plan(&config),
        AppCommands::CheckEnv {} => env::check_env(&config)?,
        AppCommands::DeployErc20 { mode, name, symbol, decimals } => {
            tokens::deploy_erc20(&config, mode, NewToken { name, symbol, decimals })?;
        },
        AppCommands::Up {} => infra::up(&config)?,
        AppCommands::Down { volumes } => infra::down(&config, volumes)?,
    }

    Ok(())
}

/// `CI` set to any non-empty value marks a continuous-integration run.
fn ci_detected() -> bool {
    std::env::var_os("CI").is_some_and(|value| !value.is_empty())
}
