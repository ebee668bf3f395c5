use anyhow::Result;
use zk_kernel::domain::config::ToolkitConfig;
use zk_kernel::init::init_pipeline;
use zk_kernel::pipeline::StepStatus;
use zk_kernel::process::SystemRunner;

/// Runs the full development network initialization.
///
/// # Errors
/// Returns the first failing fail-fast step, with the failing command in the error chain.
pub fn run_init(config: &ToolkitConfig) -> Result<()> {
    println!("🛠️  Initializing zkSync development network...");
    if config.ci {
        println!("🤖 CI environment detected, infrastructure will not be started.");
    }

    let report = init_pipeline(config).run(&SystemRunner)?;

    for outcome in &report.outcomes {
        if let StepStatus::Tolerated(reason) = &outcome.status {
            println!("⚠️  '{}' failed but was allowed to: {reason}", outcome.name);
        }
    }

    println!("\n✨ Development network is ready.");
    Ok(())
}

/// Prints the initialization steps as a table.
pub fn print_plan(config: &ToolkitConfig) {
    let pipeline = init_pipeline(config);

    println!("\nInitialization plan:\n");
    println!("{:<4} {:<28} {:<12} {:<8}", "#", "Step", "On failure", "Enabled");
    println!("{:-<56}", "");

    for (index, step) in pipeline.steps().iter().enumerate() {
        let enabled = if step.is_enabled() { "yes" } else { "skipped" };
        println!("{:<4} {:<28} {:<12} {:<8}", index + 1, step.name(), step.policy(), enabled);
    }
    println!();
}
