use assert_cmd::Command;
use predicates::prelude::*;

fn zk() -> Command {
    let mut cmd = Command::cargo_bin("zk").expect("zk binary");
    cmd.env_remove("CI").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    zk().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("deploy-erc20"))
        .stdout(predicate::str::contains("check-env"));
}

#[test]
fn init_takes_no_arguments() {
    zk().args(["init", "--force"]).assert().failure();
}

#[test]
fn plan_lists_steps_in_order() {
    let assert = zk().arg("plan").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    let preflight = stdout.find("preflight").expect("preflight row");
    let genesis = stdout.find("genesis").expect("genesis row");
    let redeploy = stdout.find("redeploy contracts").expect("redeploy row");
    assert!(preflight < genesis && genesis < redeploy, "{stdout}");
    assert!(stdout.contains("tolerate"));
    assert!(!stdout.contains("skipped"));
}

#[test]
fn plan_marks_infrastructure_skipped_in_ci() {
    zk().env("CI", "true")
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));
}

#[test]
fn unknown_deploy_mode_is_rejected() {
    zk().args(["deploy-erc20", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported deployment mode 'prod'"));
}

#[test]
fn new_token_requires_decimals() {
    zk().args(["deploy-erc20", "new", "--name", "Test", "--symbol", "TST"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing token parameter: --decimals"));
}

#[test]
fn explicit_config_must_exist() {
    zk().args(["--config", "/nonexistent/zk.toml", "plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn log_dir_receives_debug_events() {
    let tmp_dir = tempfile::tempdir().expect("temp dir");

    zk().arg("--log-dir").arg(tmp_dir.path()).args(["-v", "plan"]).assert().success();

    let contents = std::fs::read_to_string(tmp_dir.path().join("zk.log")).expect("zk.log");
    assert!(contents.contains("Configuration loaded"), "{contents}");
}

#[test]
fn log_json_requires_log_dir() {
    zk().args(["--log-json", "plan"]).assert().failure().stderr(predicate::str::contains("--log-dir"));
}
