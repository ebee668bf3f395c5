use crate::error::{Result, ToolkitError};
use crate::pipeline::Task;
use crate::process::{CommandRunner, Invocation};
use std::path::PathBuf;
use tracing::info;
use zk_domain::config::InfraConfig;

/// `docker-compose` wrapper for the development containers.
#[derive(Debug, Clone)]
pub struct DockerCompose {
    file_path: PathBuf,
    services: Vec<String>,
}

impl DockerCompose {
    #[must_use]
    pub fn new(infra: &InfraConfig) -> Self {
        Self { file_path: infra.compose_file.clone(), services: infra.services.clone() }
    }

    /// Override the compose file path (useful for testing/custom setups).
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    fn command(&self, args: &[&str]) -> Invocation {
        Invocation::new("docker-compose").arg("-f").path_arg(&self.file_path).args(args.iter().copied())
    }

    /// Bring up the configured services in the background.
    #[must_use]
    pub fn up_command(&self) -> Invocation {
        self.command(&["up", "-d"]).args(self.services.iter().map(String::as_str))
    }

    /// Stop every service, optionally removing volumes (wipes the database).
    #[must_use]
    pub fn down_command(&self, volumes: bool) -> Invocation {
        if volumes { self.command(&["down", "-v"]) } else { self.command(&["down"]) }
    }

    fn run(&self, runner: &dyn CommandRunner, invocation: &Invocation) -> Result<()> {
        if !self.file_path.exists() {
            return Err(ToolkitError::ComposeFileMissing {
                path: self.file_path.display().to_string(),
            });
        }
        runner.run(invocation).map(|_| ())
    }

    /// Bring up the infrastructure.
    ///
    /// # Errors
    /// Returns an error if the compose file is missing or `docker-compose` fails.
    pub fn up(&self, runner: &dyn CommandRunner) -> Result<()> {
        info!(services = ?self.services, "Bringing up infrastructure");
        self.run(runner, &self.up_command())
    }

    /// Shuts down the infrastructure.
    ///
    /// # Errors
    /// Returns an error if the compose file is missing or `docker-compose` fails.
    pub fn down(&self, runner: &dyn CommandRunner, volumes: bool) -> Result<()> {
        info!(volumes, "Shutting down infrastructure");
        self.run(runner, &self.down_command(volumes))
    }
}

/// Pipeline adapter for [`DockerCompose::up`].
#[derive(Debug, Clone)]
pub struct InfraUp(pub DockerCompose);

impl Task for InfraUp {
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()> {
        self.0.up(runner)
    }
}
