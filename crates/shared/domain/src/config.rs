use serde::Deserialize;
use std::path::PathBuf;

/// Top-level toolbox configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Running inside continuous integration. Infrastructure provisioning is skipped when set.
    pub ci: bool,
    pub toolchain: ToolchainConfig,
    pub paths: PathsConfig,
    pub infra: InfraConfig,
    pub database: DatabaseConfig,
    pub setup: SetupConfig,
    pub keys: KeysConfig,
    pub server: ServerConfig,
}

/// External tools that must be present before initialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub min_node_version: String,
    pub required_tools: Vec<String>,
}

/// Repository-relative locations the toolbox reads or writes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub contracts_dir: PathBuf,
    pub tokens_file: PathBuf,
    pub hooks_dir: PathBuf,
    pub storage_dir: PathBuf,
}

/// Development containers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InfraConfig {
    pub compose_file: PathBuf,
    pub services: Vec<String>,
}

/// `PostgreSQL` connection and readiness polling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub wait_attempts: u32,
    pub wait_interval_secs: u64,
}

/// Universal setup keys used by the plonk prover.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub url: String,
    pub dir: PathBuf,
    pub min_power: u32,
    pub max_power: u32,
}

/// Pre-generated verification keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub tarball: PathBuf,
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub binary: String,
}

// --- Default ---

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            min_node_version: "10.20.1".to_owned(),
            required_tools: [
                "node",
                "yarn",
                "docker",
                "docker-compose",
                "cargo",
                "psql",
                "pg_isready",
                "diesel",
                "solc",
            ]
            .into_iter()
            .map(ToOwned::to_owned)
            .collect(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            contracts_dir: PathBuf::from("contracts"),
            tokens_file: PathBuf::from("etc/tokens/localhost.json"),
            hooks_dir: PathBuf::from(".githooks"),
            storage_dir: PathBuf::from("core/lib/storage"),
        }
    }
}

impl Default for InfraConfig {
    fn default() -> Self {
        Self {
            compose_file: PathBuf::from("docker-compose.yml"),
            services: vec!["geth".to_owned(), "postgres".to_owned()],
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://postgres@localhost/plasma".to_owned(),
            wait_attempts: 4,
            wait_interval_secs: 5,
        }
    }
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            url: "https://universal-setup.ams3.digitaloceanspaces.com".to_owned(),
            dir: PathBuf::from("keys/setup"),
            min_power: 20,
            max_power: 26,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            tarball: PathBuf::from("keys/packed/verify-keys.tar.gz"),
            dir: PathBuf::from("keys/contracts"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { binary: "zksync_server".to_owned() }
    }
}
