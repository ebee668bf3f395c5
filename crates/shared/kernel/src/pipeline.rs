//! Ordered, named steps with an explicit failure policy.
//!
//! Steps run strictly in sequence. A step marked [`FailurePolicy::Abort`] stops the pipeline on
//! its first error, a step marked [`FailurePolicy::Tolerate`] has its error logged and
//! recorded, and execution moves on. Disabled steps are recorded as skipped and never reach the
//! runner.

use crate::error::{Result, ToolkitError};
use crate::process::{CommandRunner, Invocation};
use std::fmt;
use tracing::{info, warn};

/// Unit of work executed by a [`Step`].
pub trait Task: fmt::Debug {
    /// Performs the work using `runner` for every external process.
    ///
    /// # Errors
    /// Returns the first error encountered; the task does not retry or roll back.
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()>;
}

/// A fixed list of commands, run in order.
#[derive(Debug, Clone)]
pub struct Commands(pub Vec<Invocation>);

impl Task for Commands {
    fn execute(&self, runner: &dyn CommandRunner) -> Result<()> {
        for invocation in &self.0 {
            runner.run(invocation)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the pipeline on failure.
    Abort,
    /// Log the failure and keep going.
    Tolerate,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => f.write_str("abort"),
            Self::Tolerate => f.write_str("tolerate"),
        }
    }
}

#[derive(Debug)]
pub struct Step {
    name: &'static str,
    policy: FailurePolicy,
    enabled: bool,
    task: Box<dyn Task>,
}

impl Step {
    /// A fail-fast step.
    pub fn new(name: &'static str, task: impl Task + 'static) -> Self {
        Self { name, policy: FailurePolicy::Abort, enabled: true, task: Box::new(task) }
    }

    /// Marks the step's failure as tolerated.
    #[must_use]
    pub const fn tolerate_failure(mut self) -> Self {
        self.policy = FailurePolicy::Tolerate;
        self
    }

    /// Disables the step when `condition` holds.
    #[must_use]
    pub const fn skip_if(mut self, condition: bool) -> Self {
        self.enabled = !condition;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    /// Failed under [`FailurePolicy::Tolerate`]; holds the rendered error.
    Tolerated(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub name: &'static str,
    pub status: StepStatus,
}

/// Outcome of every step that was reached, in execution order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub outcomes: Vec<StepOutcome>,
}

impl PipelineReport {
    #[must_use]
    pub fn status_of(&self, name: &str) -> Option<&StepStatus> {
        self.outcomes.iter().find(|o| o.name == name).map(|o| &o.status)
    }

    #[must_use]
    pub fn tolerated(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o.status, StepStatus::Tolerated(_))).count()
    }
}

#[derive(Debug, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Runs every step in order.
    ///
    /// # Errors
    /// Returns [`ToolkitError::StepFailed`] naming the first fail-fast step that errored.
    /// Steps after it are not executed.
    pub fn run(&self, runner: &dyn CommandRunner) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let total = self.steps.len();

        for (index, step) in self.steps.iter().enumerate() {
            let position = index + 1;

            if !step.enabled {
                info!(step = step.name, "[{position}/{total}] Skipped");
                report.outcomes.push(StepOutcome { name: step.name, status: StepStatus::Skipped });
                continue;
            }

            info!(step = step.name, "[{position}/{total}] Running");
            let status = match (step.task.execute(runner), step.policy) {
                (Ok(()), _) => StepStatus::Succeeded,
                (Err(err), FailurePolicy::Tolerate) => {
                    warn!(step = step.name, error = %err, "Step failed, continuing");
                    StepStatus::Tolerated(err.to_string())
                },
                (Err(err), FailurePolicy::Abort) => {
                    return Err(ToolkitError::StepFailed { step: step.name, source: Box::new(err) });
                },
            };
            report.outcomes.push(StepOutcome { name: step.name, status });
        }

        Ok(report)
    }
}
