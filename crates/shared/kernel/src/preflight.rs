use crate::error::{Result, ToolkitError};
use crate::pipeline::Task;
use crate::process::{CommandRunner, Invocation, locate};
use semver::Version;
use tracing::{debug, info};
use zk_domain::config::ToolchainConfig;

const NODE: &str = "node";
const CARGO: &str = "cargo";

/// Verifies that every required tool is installed and that node.js is recent enough.
#[derive(Debug, Clone)]
pub struct Preflight {
    required_tools: Vec<String>,
    min_node_version: String,
}

impl Preflight {
    #[must_use]
    pub fn new(toolchain: &ToolchainConfig) -> Self {
        Self {
            required_tools: toolchain.required_tools.clone(),
            min_node_version: toolchain.min_node_version.clone(),
        }
    }
}

impl Task for Preflight {
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()> {
        let required = parse_version(&self.min_node_version)?;

        locate(runner, NODE)?;
        let output = runner.run(&Invocation::new(NODE).arg("--version").captured())?;
        let installed = check_node_version(&output.stdout, &required)?;
        info!(%installed, "node.js version accepted");

        for tool in self.required_tools.iter().filter(|t| t.as_str() != NODE) {
            debug!(tool, "Locating");
            locate(runner, tool)?;
            if tool == CARGO {
                runner.run(&Invocation::new(CARGO).args(["sqlx", "--version"]).captured())?;
            }
        }
        Ok(())
    }
}

/// Parses a tool version string such as `v18.17.0`, `10.20` or `v21.0.0-nightly`.
///
/// A leading `v` and surrounding whitespace are ignored and missing minor/patch components
/// are treated as zero.
///
/// # Errors
/// Returns [`ToolkitError::VersionParse`] when the string is not a version.
pub fn parse_version(raw: &str) -> Result<Version> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let split_at = bare.find(['-', '+']).unwrap_or(bare.len());
    let (core, suffix) = bare.split_at(split_at);
    let padded = match core.matches('.').count() {
        0 => format!("{core}.0.0{suffix}"),
        1 => format!("{core}.0{suffix}"),
        _ => bare.to_owned(),
    };

    Version::parse(&padded)
        .map_err(|source| ToolkitError::VersionParse { raw: trimmed.to_owned(), source })
}

/// Accepts `installed` when it is the same as or newer than `required`.
///
/// # Errors
/// Returns [`ToolkitError::VersionTooLow`] for older versions and
/// [`ToolkitError::VersionParse`] for unreadable ones.
pub fn check_node_version(installed: &str, required: &Version) -> Result<Version> {
    let found = parse_version(installed)?;
    if found < *required {
        return Err(ToolkitError::VersionTooLow { found, required: required.clone() });
    }
    Ok(found)
}
