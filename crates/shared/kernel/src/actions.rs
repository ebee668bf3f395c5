//! Development actions driven by `zk init`.
//!
//! Each action maps one opaque collaborator (git, yarn, diesel, the contracts package, the
//! server binary) to concrete invocations.

use crate::error::{Result, ToolkitErrorExt};
use crate::pipeline::{Commands, Task};
use crate::process::{CommandRunner, Invocation};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use zk_domain::config::{DatabaseConfig, KeysConfig, PathsConfig, ServerConfig, SetupConfig};

/// Points git at the repository hook directory. A no-op outside a git checkout.
#[derive(Debug, Clone)]
pub struct GitHooks {
    repo_root: PathBuf,
    hooks_dir: PathBuf,
}

impl GitHooks {
    #[must_use]
    pub fn new(paths: &PathsConfig) -> Self {
        Self { repo_root: PathBuf::from("."), hooks_dir: paths.hooks_dir.clone() }
    }

    #[must_use]
    pub fn in_repo(mut self, root: impl Into<PathBuf>) -> Self {
        self.repo_root = root.into();
        self
    }
}

impl Task for GitHooks {
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()> {
        if !self.repo_root.join(".git").exists() {
            info!(root = %self.repo_root.display(), "Not a git checkout, hooks left untouched");
            return Ok(());
        }
        let invocation = Invocation::new("git")
            .args(["config", "--local", "core.hooksPath"])
            .path_arg(&self.hooks_dir)
            .cwd(&self.repo_root);
        runner.run(&invocation).map(|_| ())
    }
}

#[must_use]
pub fn install_dependencies() -> Commands {
    Commands(vec![Invocation::new("yarn").args(["install", "--frozen-lockfile"])])
}

/// Downloads the universal setup keys that are not already present.
#[derive(Debug, Clone)]
pub struct PlonkSetup {
    config: SetupConfig,
}

impl PlonkSetup {
    #[must_use]
    pub fn new(config: &SetupConfig) -> Self {
        Self { config: config.clone() }
    }

    fn key_file(power: u32) -> String {
        format!("setup_2^{power}.key")
    }

    #[must_use]
    pub fn download_command(&self, power: u32) -> Invocation {
        let url = self.config.url.trim_end_matches('/');
        Invocation::new("axel")
            .arg("-c")
            .arg(format!("{url}/setup_2%5E{power}.key"))
            .cwd(&self.config.dir)
    }
}

impl Task for PlonkSetup {
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()> {
        let dir = &self.config.dir;
        fs::create_dir_all(dir).context(format!("Failed to create path: {}", dir.display()))?;

        for power in self.config.min_power..=self.config.max_power {
            if dir.join(Self::key_file(power)).exists() {
                debug!(power, "Setup key already present");
                continue;
            }
            info!(power, "Downloading setup key");
            runner
                .run(&self.download_command(power))
                .context(format!("Failed to download {}", Self::key_file(power)))?;
        }
        Ok(())
    }
}

/// Extracts the pre-generated verification keys.
#[derive(Debug, Clone)]
pub struct UnpackKeys {
    config: KeysConfig,
}

impl UnpackKeys {
    #[must_use]
    pub fn new(config: &KeysConfig) -> Self {
        Self { config: config.clone() }
    }

    #[must_use]
    pub fn command(&self) -> Invocation {
        Invocation::new("tar").arg("xf").path_arg(&self.config.tarball).arg("-C").path_arg(&self.config.dir)
    }
}

impl Task for UnpackKeys {
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()> {
        let dir = &self.config.dir;
        fs::create_dir_all(dir).context(format!("Failed to create path: {}", dir.display()))?;
        runner.run(&self.command()).map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseTask {
    /// Create the database and run every migration.
    Setup,
    /// Drop, recreate and migrate.
    Reset,
}

/// Diesel-driven database preparation, preceded by a readiness wait.
#[derive(Debug, Clone)]
pub struct Database {
    task: DatabaseTask,
    config: DatabaseConfig,
    storage_dir: PathBuf,
}

impl Database {
    #[must_use]
    pub fn new(task: DatabaseTask, config: &DatabaseConfig, paths: &PathsConfig) -> Self {
        Self { task, config: config.clone(), storage_dir: paths.storage_dir.clone() }
    }

    fn diesel(&self, args: &[&str]) -> Invocation {
        Invocation::new("diesel")
            .args(args.iter().copied())
            .cwd(&self.storage_dir)
            .env("DATABASE_URL", &self.config.url)
    }

    #[must_use]
    pub fn commands(&self) -> Vec<Invocation> {
        match self.task {
            DatabaseTask::Setup => {
                vec![self.diesel(&["database", "setup"]), self.diesel(&["migration", "run"])]
            },
            DatabaseTask::Reset => vec![self.diesel(&["database", "reset"])],
        }
    }
}

impl Task for Database {
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()> {
        wait_for_database(runner, &self.config)?;
        Commands(self.commands()).execute(runner)
    }
}

/// Polls `pg_isready` until the database accepts connections.
///
/// # Errors
/// Returns the last `pg_isready` failure once every attempt is used up.
pub fn wait_for_database(runner: &dyn CommandRunner, config: &DatabaseConfig) -> Result<()> {
    let probe = Invocation::new("pg_isready").args(["-d", config.url.as_str()]).captured();
    let attempts = config.wait_attempts.max(1);
    let mut attempt = 1;

    loop {
        match runner.run(&probe) {
            Ok(_) => return Ok(()),
            Err(err) if attempt >= attempts => return Err(err),
            Err(err) => {
                warn!(attempt, attempts, error = %err, "Database is not ready yet");
                thread::sleep(Duration::from_secs(config.wait_interval_secs));
                attempt += 1;
            },
        }
    }
}

fn yarn_contracts(contracts_dir: &Path, script: &str) -> Commands {
    Commands(vec![Invocation::new("yarn").arg("--cwd").path_arg(contracts_dir).arg(script)])
}

/// Compiles contracts with the development configuration.
#[must_use]
pub fn build_contracts_dev(paths: &PathsConfig) -> Commands {
    yarn_contracts(&paths.contracts_dir, "build-dev")
}

#[must_use]
pub fn build_contracts(paths: &PathsConfig) -> Commands {
    yarn_contracts(&paths.contracts_dir, "build")
}

/// Deploys the already compiled contracts against the current genesis.
#[must_use]
pub fn redeploy_contracts(paths: &PathsConfig) -> Commands {
    yarn_contracts(&paths.contracts_dir, "deploy-no-build")
}

#[must_use]
pub fn genesis(server: &ServerConfig) -> Commands {
    Commands(vec![
        Invocation::new("cargo")
            .args(["run", "--bin", server.binary.as_str(), "--release", "--", "--genesis"]),
    ])
}
