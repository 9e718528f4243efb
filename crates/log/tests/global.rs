//! Global installation happens once per process.

use pretty_assertions::assert_eq;
use quorum_log::{Config, LogError, LoggerBuilder};

#[test]
fn second_global_install_fails() {
    let config = Config {
        level: "off".into(),
        ..Config::default()
    };
    assert!(LoggerBuilder::from_config(config.clone()).build().is_ok());
    assert_eq!(
        LoggerBuilder::from_config(config).build().unwrap_err(),
        LogError::AlreadyInitialized
    );
}
