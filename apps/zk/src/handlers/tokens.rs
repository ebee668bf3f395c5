use anyhow::Result;
use zk_kernel::domain::config::ToolkitConfig;
use zk_kernel::domain::tokens::DeployMode;
use zk_kernel::pipeline::Task;
use zk_kernel::process::SystemRunner;
use zk_kernel::tokens::{Erc20Deployment, NewToken};

/// Deploys ERC20 tokens in the requested mode.
///
/// # Errors
/// Returns an error if a `new` token is under-specified or the deployment script fails.
pub fn deploy_erc20(config: &ToolkitConfig, mode: DeployMode, token: NewToken) -> Result<()> {
    let deployment = match mode {
        DeployMode::Dev => Erc20Deployment::dev(&config.paths),
        DeployMode::New => Erc20Deployment::new_token(&config.paths, token),
    };

    deployment.execute(&SystemRunner)?;

    if mode == DeployMode::Dev {
        println!("🪙 Token addresses written to '{}'.", config.paths.tokens_file.display());
    }
    Ok(())
}
