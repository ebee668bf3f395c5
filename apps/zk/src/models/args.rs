//! # CLI Argument Definitions
//!
//! Command-line interface of the `zk` binary, defined with `clap`.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use zk_kernel::domain::tokens::DeployMode;
use zk_kernel::tokens::parse_mode;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "zk")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Development toolbox for the zkSync network")]
pub struct Cli {
    /// Configuration file (defaults to 'etc/zk.toml' when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to '<DIR>/zk.log'
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write the log file as JSON lines
    #[arg(long, global = true, requires = "log_dir")]
    pub log_json: bool,

    /// Tracing filter directives (e.g. 'zk_kernel=trace'), overriding RUST_LOG
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// The main subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Perform zksync network initialization for development
    Init {},
    /// Print the ordered initialization steps without running them
    Plan {},
    /// Verify that every required tool is installed
    CheckEnv {},
    /// Deploy ERC20 token contracts
    #[command(name = "deploy-erc20")]
    DeployErc20 {
        /// 'dev' deploys the fixed development tokens, 'new' deploys a single token
        #[arg(value_parser = parse_mode)]
        mode: DeployMode,
        /// Token name (required for 'new')
        #[arg(long)]
        name: Option<String>,
        /// Token symbol (required for 'new')
        #[arg(long)]
        symbol: Option<String>,
        /// Token decimal precision (required for 'new')
        #[arg(long)]
        decimals: Option<u8>,
    },
    /// Start the development containers
    Up {},
    /// Stop the development containers
    Down {
        /// Also remove volumes (wipes the database)
        #[arg(long)]
        volumes: bool,
    },
}
