//! Orchestration core of the `zk` development toolbox.
//!
//! Every external tool is described as an [`process::Invocation`] and executed through a
//! [`process::CommandRunner`], so whole procedures can be exercised against a recording fake.
//! Procedures are ordered [`pipeline::Step`]s with an explicit failure policy.
//!
//! ## Example
//! ```rust,no_run
//! use zk_kernel::config::load_config;
//! use zk_kernel::init::init_pipeline;
//! use zk_kernel::process::SystemRunner;
//!
//! let config = load_config(None)?;
//! let report = init_pipeline(&config).run(&SystemRunner)?;
//! assert!(report.outcomes.len() > 0);
//! # Ok::<(), zk_kernel::error::ToolkitError>(())
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod infra;
pub mod init;
pub mod pipeline;
pub mod preflight;
pub mod process;
pub mod tokens;

pub use zk_domain as domain;
