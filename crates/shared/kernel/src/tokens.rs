use crate::error::{Result, ToolkitError, ToolkitErrorExt};
use crate::pipeline::Task;
use crate::process::{CommandRunner, Invocation};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use zk_domain::config::PathsConfig;
use zk_domain::tokens::{DEV_TOKENS, DeployMode, TokenDescriptor};

/// Resolves a deployment mode tag.
///
/// # Errors
/// Returns [`ToolkitError::UnsupportedMode`] for anything other than `dev` or `new`.
pub fn parse_mode(tag: &str) -> Result<DeployMode> {
    DeployMode::from_tag(tag).ok_or_else(|| ToolkitError::UnsupportedMode { mode: tag.to_owned() })
}

/// Caller-supplied description of a single token for [`DeployMode::New`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewToken {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
}

/// ERC20 deployment through the contracts package's `deploy-erc20` script.
#[derive(Debug, Clone)]
pub struct Erc20Deployment {
    mode: DeployMode,
    token: NewToken,
    contracts_dir: PathBuf,
    output: PathBuf,
}

impl Erc20Deployment {
    /// Deploys the fixed development token set and records their addresses.
    #[must_use]
    pub fn dev(paths: &PathsConfig) -> Self {
        Self {
            mode: DeployMode::Dev,
            token: NewToken::default(),
            contracts_dir: paths.contracts_dir.clone(),
            output: paths.tokens_file.clone(),
        }
    }

    /// Deploys exactly one token described by the caller.
    #[must_use]
    pub fn new_token(paths: &PathsConfig, token: NewToken) -> Self {
        Self {
            mode: DeployMode::New,
            token,
            contracts_dir: paths.contracts_dir.clone(),
            output: paths.tokens_file.clone(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> DeployMode {
        self.mode
    }

    /// Builds the single invocation this deployment issues.
    ///
    /// # Errors
    /// Returns [`ToolkitError::MissingTokenField`] when a `new` token lacks a name, symbol
    /// or decimals, and [`ToolkitError::Json`] if the token batch cannot be encoded.
    pub fn invocation(&self) -> Result<Invocation> {
        let base = |silent: bool| {
            let inv = if silent { Invocation::new("yarn").arg("--silent") } else { Invocation::new("yarn") };
            inv.arg("--cwd").path_arg(&self.contracts_dir).arg("deploy-erc20")
        };

        match self.mode {
            DeployMode::Dev => {
                let batch = serde_json::to_string(&DEV_TOKENS).context("Encoding token batch")?;
                Ok(base(true).arg("add-multi").arg(batch).captured())
            },
            DeployMode::New => {
                let token = self.token.descriptor()?;
                Ok(base(false)
                    .arg("add")
                    .args(["--name", token.name, "--symbol", token.symbol])
                    .arg("--decimals")
                    .arg(token.decimals.to_string()))
            },
        }
    }
}

impl NewToken {
    fn descriptor(&self) -> Result<TokenDescriptor<'_>> {
        let name = self.name.as_deref().ok_or(ToolkitError::MissingTokenField { field: "name" })?;
        let symbol =
            self.symbol.as_deref().ok_or(ToolkitError::MissingTokenField { field: "symbol" })?;
        let decimals = self.decimals.ok_or(ToolkitError::MissingTokenField { field: "decimals" })?;
        Ok(TokenDescriptor::new(name, symbol, decimals))
    }
}

impl Task for Erc20Deployment {
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()> {
        let invocation = self.invocation()?;
        let output = runner.run(&invocation)?;

        if self.mode == DeployMode::Dev {
            write_token_list(&self.output, &output.stdout)?;
            info!(path = %self.output.display(), count = DEV_TOKENS.len(), "Development tokens deployed");
        } else {
            info!("Token deployed");
        }
        Ok(())
    }
}

fn write_token_list(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).context(format!("Failed to write token list: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_modes_are_rejected() {
        assert_eq!(parse_mode("dev").unwrap(), DeployMode::Dev);
        assert_eq!(parse_mode("new").unwrap(), DeployMode::New);
        let err = parse_mode("prod").unwrap_err();
        assert!(matches!(err, ToolkitError::UnsupportedMode { ref mode } if mode == "prod"));
        assert!(err.to_string().contains("Unsupported deployment mode 'prod'"));
    }

    #[test]
    fn dev_invocation_is_one_batch_call() {
        let inv = Erc20Deployment::dev(&PathsConfig::default()).invocation().unwrap();
        assert!(inv.capture);
        assert_eq!(inv.program, "yarn");
        assert_eq!(&inv.args[..5], ["--silent", "--cwd", "contracts", "deploy-erc20", "add-multi"]);
        assert_eq!(inv.args.len(), 6);

        let batch: Vec<TokenDescriptor<'_>> = serde_json::from_str(&inv.args[5]).unwrap();
        assert_eq!(batch, DEV_TOKENS.to_vec());
    }

    #[test]
    fn new_invocation_uses_caller_values() {
        let token = NewToken {
            name: Some("Test Token".to_owned()),
            symbol: Some("TST".to_owned()),
            decimals: Some(6),
        };
        let inv = Erc20Deployment::new_token(&PathsConfig::default(), token).invocation().unwrap();
        assert!(!inv.capture);
        assert!(inv.is(&[
            "yarn",
            "--cwd",
            "contracts",
            "deploy-erc20",
            "add",
            "--name",
            "Test Token",
            "--symbol",
            "TST",
            "--decimals",
            "6",
        ]));
    }

    #[test]
    fn new_token_requires_every_field() {
        let token = NewToken { name: Some("A".to_owned()), symbol: None, decimals: Some(18) };
        let err = Erc20Deployment::new_token(&PathsConfig::default(), token).invocation().unwrap_err();
        assert!(matches!(err, ToolkitError::MissingTokenField { field: "symbol" }));
    }
}
