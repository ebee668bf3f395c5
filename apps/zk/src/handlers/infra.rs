use anyhow::Result;
use zk_kernel::domain::config::ToolkitConfig;
use zk_kernel::infra::DockerCompose;
use zk_kernel::process::SystemRunner;

/// Starts the development containers.
///
/// # Errors
/// Returns an error if the compose file is missing or `docker-compose` fails.
pub fn up(config: &ToolkitConfig) -> Result<()> {
    DockerCompose::new(&config.infra).up(&SystemRunner)?;
    println!("\n✨ Infrastructure is ready.");
    println!("🔗 PostgreSQL: {}", config.database.url);
    Ok(())
}

/// Stops the development containers.
///
/// # Errors
/// Returns an error if the compose file is missing or `docker-compose` fails.
pub fn down(config: &ToolkitConfig, volumes: bool) -> Result<()> {
    DockerCompose::new(&config.infra).down(&SystemRunner, volumes)?;
    Ok(())
}
