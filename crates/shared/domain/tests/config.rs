use serde_json::json;
use std::path::PathBuf;
use zk_domain::config::{DatabaseConfig, PathsConfig, ToolchainConfig, ToolkitConfig};

#[test]
fn config_defaults_are_sane() {
    let toolchain = ToolchainConfig::default();
    assert_eq!(toolchain.min_node_version, "10.20.1");
    assert_eq!(toolchain.required_tools.first().map(String::as_str), Some("node"));
    assert!(toolchain.required_tools.iter().any(|t| t == "docker-compose"));
    assert!(toolchain.required_tools.iter().any(|t| t == "solc"));

    let paths = PathsConfig::default();
    assert_eq!(paths.tokens_file, PathBuf::from("etc/tokens/localhost.json"));
    assert_eq!(paths.contracts_dir, PathBuf::from("contracts"));

    let db = DatabaseConfig::default();
    assert_eq!(db.wait_attempts, 4);

    assert!(!ToolkitConfig::default().ci);
}

#[test]
fn toolkit_config_deserializes_partial_documents() {
    let raw = json!({
        "ci": true,
        "database": { "url": "postgres://dev@db/zk" },
        "paths": { "tokens_file": "/tmp/tokens.json" },
        "infra": { "services": ["postgres"] }
    });

    let cfg: ToolkitConfig = serde_json::from_value(raw).expect("config deserialize");
    assert!(cfg.ci);
    assert_eq!(cfg.database.url, "postgres://dev@db/zk");
    assert_eq!(cfg.database.wait_interval_secs, 5);
    assert_eq!(cfg.paths.tokens_file, PathBuf::from("/tmp/tokens.json"));
    assert_eq!(cfg.paths.hooks_dir, PathBuf::from(".githooks"));
    assert_eq!(cfg.infra.services, vec!["postgres".to_owned()]);
    assert_eq!(cfg.server.binary, "zksync_server");
}
