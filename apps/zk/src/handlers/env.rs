use anyhow::{Context, Result};
use zk_kernel::domain::config::ToolkitConfig;
use zk_kernel::pipeline::Task;
use zk_kernel::preflight::Preflight;
use zk_kernel::process::SystemRunner;

/// Verifies the development toolchain without changing anything.
///
/// # Errors
/// Returns an error naming the first missing tool or an outdated node.js.
pub fn check_env(config: &ToolkitConfig) -> Result<()> {
    println!("🔎 Checking development environment...");
    Preflight::new(&config.toolchain).execute(&SystemRunner).context("Environment check failed")?;
    println!("✅ All required tools are installed.");
    Ok(())
}
