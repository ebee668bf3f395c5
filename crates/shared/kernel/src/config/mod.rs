use crate::error::{Result, ToolkitErrorExt};
use config::{Config, Environment, File, Map};
use std::path::{Path, PathBuf};
use tracing::info;
use zk_domain::config::ToolkitConfig;

/// Config file consulted when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "etc/zk.toml";
/// Prefix of environment overrides (`ZK__DATABASE__URL` maps to `database.url`).
pub const ENV_PREFIX: &str = "ZK";

/// Loads the toolbox configuration with process environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Defaults**: [`ToolkitConfig::default`], filled in for every key the other layers omit.
/// 2. **File**: `path`, or [`DEFAULT_CONFIG_PATH`] when `None`. An explicit path must exist;
///    the default one is optional.
/// 3. **Environment**: variables prefixed with `ZK__`, nested with `__`.
///
/// # Errors
/// Returns [`crate::error::ToolkitError::Config`] if an explicit file is missing or a value does not match
/// the structure of [`ToolkitConfig`].
pub fn load_config(path: Option<&Path>) -> Result<ToolkitConfig> {
    load_config_with_env(path, None)
}

/// Same as [`load_config`], reading overrides from `env` instead of the process environment
/// when provided.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<ToolkitConfig> {
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        |p| (p.to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(env),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<ToolkitConfig>()
        .context("Failed to deserialize config")
}
