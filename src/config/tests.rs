use super::settings::Settings;
use super::{load_config, load_config_from};
use crate::broker::EvictionPolicy;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8081);
    assert_eq!(settings.broker.eviction, EvictionPolicy::Deferred);
    assert_eq!(settings.log.level, "info");
    assert_eq!(settings.addr(), "127.0.0.1:8081");
}

#[test]
#[serial]
fn test_missing_file_yields_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let cfg = load_config_from(tmp.path().join("absent")).expect("load_config failed");
    assert_eq!(cfg, Settings::default());
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9000

        [broker]
        eviction = "immediate"
    "#;
    fs::write(tmp.path().join("default.toml"), toml).expect("write config file");

    let cfg = load_config_from(tmp.path().join("default")).expect("load_config failed");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.broker.eviction, EvictionPolicy::Immediate);
    // untouched section keeps its default
    assert_eq!(cfg.log.level, "info");
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("default.toml"),
        "[server]\nport = 9000\n",
    )
    .expect("write config file");

    temp_env::with_vars(
        [
            ("SOCKETY_SERVER_PORT", Some("9100")),
            ("SOCKETY_LOG_LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config_from(tmp.path().join("default")).expect("load_config failed");
            assert_eq!(cfg.server.port, 9100);
            assert_eq!(cfg.log.level, "debug");
            assert_eq!(cfg.server.host, "127.0.0.1");
        },
    );
}

#[test]
#[serial]
fn test_invalid_eviction_is_rejected() {
    temp_env::with_var("SOCKETY_BROKER_EVICTION", Some("never"), || {
        assert!(load_config().is_err());
    });
}
