use std::borrow::Cow;

/// Errors raised while orchestrating the development toolchain.
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    /// The process could not be launched at all (missing binary, permissions, ...).
    #[error("Failed to execute `{command}`{}: {source}", format_context(.context))]
    Spawn { command: String, source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The process ran and exited unsuccessfully.
    #[error("Command `{command}` failed with {status}{}", format_context(.context))]
    CommandFailed { command: String, status: String, context: Option<Cow<'static, str>> },

    #[error("Error, node.js version {required} or higher is required (found {found})")]
    VersionTooLow { found: semver::Version, required: semver::Version },

    #[error("Unrecognized version string '{raw}': {source}")]
    VersionParse { raw: String, source: semver::Error },

    #[error("Unsupported deployment mode '{mode}' (expected 'dev' or 'new')")]
    UnsupportedMode { mode: String },

    #[error("Missing token parameter: --{field}")]
    MissingTokenField { field: &'static str },

    #[error("Docker compose file not found at: {path}")]
    ComposeFileMissing { path: String },

    /// A pipeline step failed with the fail-fast policy.
    #[error("Step '{step}' failed: {source}")]
    StepFailed { step: &'static str, source: Box<ToolkitError> },

    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Serialization error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

pub type Result<T> = std::result::Result<T, ToolkitError>;

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Adds `.context(..)` to toolkit results and to results of wrapped upstream errors.
pub trait ToolkitErrorExt<T> {
    /// Attaches a human-readable note to the error, if any.
    ///
    /// # Errors
    /// Returns the original error converted into [`ToolkitError`].
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> ToolkitErrorExt<T> for Result<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                ToolkitError::Spawn { context: c, .. }
                | ToolkitError::CommandFailed { context: c, .. }
                | ToolkitError::Io { context: c, .. }
                | ToolkitError::Json { context: c, .. }
                | ToolkitError::Config { context: c, .. } => *c = Some(context.into()),
                _ => {},
            }
            e
        })
    }
}

macro_rules! wrap_source {
    ($source:ty => $variant:ident) => {
        impl From<$source> for ToolkitError {
            fn from(source: $source) -> Self {
                Self::$variant { source, context: None }
            }
        }

        impl<T> ToolkitErrorExt<T> for std::result::Result<T, $source> {
            fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
                self.map_err(|source| ToolkitError::$variant { source, context: Some(context.into()) })
            }
        }
    };
}

wrap_source!(std::io::Error => Io);
wrap_source!(serde_json::Error => Json);
wrap_source!(config::ConfigError => Config);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_rendered_in_parentheses() {
        let err = std::fs::read("/definitely/not/here").context("Reading token file").unwrap_err();
        assert!(err.to_string().starts_with("I/O error (Reading token file): "), "{err}");
    }

    #[test]
    fn context_on_failed_command() {
        let res: Result<()> = Err(ToolkitError::CommandFailed {
            command: "yarn build".to_owned(),
            status: "exit status: 1".to_owned(),
            context: None,
        });
        let err = res.context("Building contracts").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command `yarn build` failed with exit status: 1 (Building contracts)"
        );
    }
}
