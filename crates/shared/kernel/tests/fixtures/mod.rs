#![allow(dead_code, unreachable_pub)]

use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;
use zk_kernel::domain::config::ToolkitConfig;
use zk_kernel::error::{Result, ToolkitError};
use zk_kernel::process::{CommandOutput, CommandRunner, Invocation};

pub const NODE_VERSION: &str = "v18.17.0\n";
pub const TOKEN_LIST: &str = r#"[{"address":"0x01","symbol":"DAI"}]"#;

/// Records every invocation and answers from canned responses instead of spawning processes.
///
/// Commands are matched by the prefix of their rendered form (`program arg1 arg2 ...`).
#[derive(Debug)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    failures: Vec<String>,
    responses: Vec<(String, String)>,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failures: Vec::new(),
            responses: vec![
                ("node --version".to_owned(), NODE_VERSION.to_owned()),
                ("yarn --silent".to_owned(), TOKEN_LIST.to_owned()),
            ],
        }
    }
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every command starting with `prefix` exit unsuccessfully.
    pub fn fail_on(mut self, prefix: &str) -> Self {
        self.failures.push(prefix.to_owned());
        self
    }

    /// Answers commands starting with `prefix` with `stdout`; newest response wins.
    pub fn respond(mut self, prefix: &str, stdout: &str) -> Self {
        self.responses.insert(0, (prefix.to_owned(), stdout.to_owned()));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.rendered().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        let rendered = invocation.to_string();

        if self.failures.iter().any(|prefix| rendered.starts_with(prefix.as_str())) {
            return Err(ToolkitError::CommandFailed {
                command: rendered,
                status: "exit status: 1".to_owned(),
                context: None,
            });
        }

        let stdout = self
            .responses
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();
        Ok(CommandOutput { stdout })
    }
}

/// A configuration whose every path lives inside a temporary directory.
pub struct Sandbox {
    pub dir: TempDir,
    pub config: ToolkitConfig,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        let mut config = ToolkitConfig::default();
        config.paths.contracts_dir = root.join("contracts");
        config.paths.tokens_file = root.join("etc/tokens/localhost.json");
        config.paths.storage_dir = root.join("core/lib/storage");
        config.infra.compose_file = root.join("docker-compose.yml");
        config.database.wait_attempts = 1;
        config.database.wait_interval_secs = 0;
        config.setup.dir = root.join("keys/setup");
        config.setup.min_power = 20;
        config.setup.max_power = 21;
        config.keys.tarball = root.join("keys/packed/verify-keys.tar.gz");
        config.keys.dir = root.join("keys/contracts");

        fs::write(&config.infra.compose_file, "services: {}\n").expect("compose file");
        fs::create_dir_all(&config.setup.dir).expect("setup dir");
        fs::write(config.setup.dir.join("setup_2^20.key"), b"key").expect("setup key");

        Self { dir, config }
    }

    pub fn ci(mut self) -> Self {
        self.config.ci = true;
        self
    }
}
