//! External process invocation.
//!
//! Every tool the toolbox drives is described by an [`Invocation`] and executed through a
//! [`CommandRunner`]. The production runner spawns real processes; tests substitute a
//! recording fake.

use crate::error::{Result, ToolkitError};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// A single external command, fully described before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
    /// Capture stdout instead of forwarding it to the terminal.
    pub capture: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), cwd: None, envs: Vec::new(), capture: false }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends a path argument (lossy on non UTF-8 paths).
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Returns `true` when the program and every argument match `words` exactly.
    #[must_use]
    pub fn is(&self, words: &[&str]) -> bool {
        let Some((program, args)) = words.split_first() else { return false };
        self.program == *program
            && self.args.len() == args.len()
            && self.args.iter().zip(args).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured stdout; empty unless [`Invocation::capture`] was set.
    pub stdout: String,
}

/// Executes invocations to completion, one at a time.
pub trait CommandRunner {
    /// Runs the invocation and waits for it to exit.
    ///
    /// # Errors
    /// Returns [`ToolkitError::Spawn`] if the process cannot be launched and
    /// [`ToolkitError::CommandFailed`] if it exits unsuccessfully.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).run(invocation)
    }
}

/// Runs real processes via [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        debug!(command = %invocation, cwd = ?invocation.cwd, "Executing");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        command.envs(invocation.envs.iter().map(|(k, v)| (OsStr::new(k), OsStr::new(v))));
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }
        command.stdin(Stdio::inherit()).stderr(Stdio::inherit());

        let spawn_err = |source| ToolkitError::Spawn {
            command: invocation.to_string(),
            source,
            context: None,
        };

        let (status, stdout) = if invocation.capture {
            let output = command.stdout(Stdio::piped()).output().map_err(spawn_err)?;
            (output.status, String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let status = command.stdout(Stdio::inherit()).status().map_err(spawn_err)?;
            (status, String::new())
        };

        if !status.success() {
            return Err(ToolkitError::CommandFailed {
                command: invocation.to_string(),
                status: status.to_string(),
                context: None,
            });
        }

        Ok(CommandOutput { stdout })
    }
}

/// Verifies that `tool` is reachable on `PATH` by running `which <tool>`.
///
/// # Errors
/// Propagates the raw failure of the `which` command.
pub fn locate(runner: &dyn CommandRunner, tool: &str) -> Result<()> {
    runner.run(&Invocation::new("which").arg(tool).captured()).map(|_| ())
}
