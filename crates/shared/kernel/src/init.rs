use crate::actions::{self, Database, DatabaseTask, GitHooks, PlonkSetup, UnpackKeys};
use crate::infra::{DockerCompose, InfraUp};
use crate::pipeline::{Pipeline, Step};
use crate::preflight::Preflight;
use crate::tokens::Erc20Deployment;
use zk_domain::config::ToolkitConfig;

pub const PREFLIGHT: &str = "preflight";
pub const GIT_HOOKS: &str = "git hooks";
pub const INFRA_UP: &str = "infrastructure up";
pub const INSTALL_DEPENDENCIES: &str = "install dependencies";
pub const PLONK_SETUP: &str = "plonk setup";
pub const UNPACK_KEYS: &str = "unpack verification keys";
pub const DATABASE_SETUP: &str = "database setup";
pub const BUILD_CONTRACTS_DEV: &str = "build contracts (dev)";
pub const DEPLOY_DEV_TOKENS: &str = "deploy dev tokens";
pub const BUILD_CONTRACTS: &str = "build contracts";
pub const DATABASE_RESET: &str = "database reset";
pub const GENESIS: &str = "genesis";
pub const REDEPLOY_CONTRACTS: &str = "redeploy contracts";

/// Assembles the development network initialization sequence.
///
/// Every step is fail-fast except dependency installation. Infrastructure provisioning is
/// disabled when `config.ci` is set.
#[must_use]
pub fn init_pipeline(config: &ToolkitConfig) -> Pipeline {
    let paths = &config.paths;

    Pipeline::new()
        .step(Step::new(PREFLIGHT, Preflight::new(&config.toolchain)))
        .step(Step::new(GIT_HOOKS, GitHooks::new(paths)))
        .step(Step::new(INFRA_UP, InfraUp(DockerCompose::new(&config.infra))).skip_if(config.ci))
        .step(Step::new(INSTALL_DEPENDENCIES, actions::install_dependencies()).tolerate_failure())
        .step(Step::new(PLONK_SETUP, PlonkSetup::new(&config.setup)))
        .step(Step::new(UNPACK_KEYS, UnpackKeys::new(&config.keys)))
        .step(Step::new(
            DATABASE_SETUP,
            Database::new(DatabaseTask::Setup, &config.database, paths),
        ))
        .step(Step::new(BUILD_CONTRACTS_DEV, actions::build_contracts_dev(paths)))
        .step(Step::new(DEPLOY_DEV_TOKENS, Erc20Deployment::dev(paths)))
        .step(Step::new(BUILD_CONTRACTS, actions::build_contracts(paths)))
        .step(Step::new(
            DATABASE_RESET,
            Database::new(DatabaseTask::Reset, &config.database, paths),
        ))
        .step(Step::new(GENESIS, actions::genesis(&config.server)))
        .step(Step::new(REDEPLOY_CONTRACTS, actions::redeploy_contracts(paths)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FailurePolicy;

    #[test]
    fn steps_are_in_order() {
        let pipeline = init_pipeline(&ToolkitConfig::default());
        let names: Vec<&str> = pipeline.steps().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                PREFLIGHT,
                GIT_HOOKS,
                INFRA_UP,
                INSTALL_DEPENDENCIES,
                PLONK_SETUP,
                UNPACK_KEYS,
                DATABASE_SETUP,
                BUILD_CONTRACTS_DEV,
                DEPLOY_DEV_TOKENS,
                BUILD_CONTRACTS,
                DATABASE_RESET,
                GENESIS,
                REDEPLOY_CONTRACTS,
            ]
        );
    }

    #[test]
    fn only_dependency_install_tolerates_failure() {
        let pipeline = init_pipeline(&ToolkitConfig::default());
        let tolerant: Vec<&str> = pipeline
            .steps()
            .iter()
            .filter(|s| s.policy() == FailurePolicy::Tolerate)
            .map(|s| s.name())
            .collect();
        assert_eq!(tolerant, vec![INSTALL_DEPENDENCIES]);
    }

    #[test]
    fn ci_disables_infrastructure_only() {
        let config = ToolkitConfig { ci: true, ..ToolkitConfig::default() };
        let pipeline = init_pipeline(&config);
        let disabled: Vec<&str> =
            pipeline.steps().iter().filter(|s| !s.is_enabled()).map(|s| s.name()).collect();
        assert_eq!(disabled, vec![INFRA_UP]);

        let local = init_pipeline(&ToolkitConfig::default());
        assert!(local.steps().iter().all(|s| s.is_enabled()));
    }
}
