//! Configuration persistence and validation.

use par_tabs::config::{
    CloseOnExit, Config, ConfigError, LogLevel, Protocol, ResizePolicy, SessionConfig,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_then_load_round_trips() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.yaml");

    let mut config = Config::default();
    config.confirm_paste = false;
    config.log_level = LogLevel::Debug;
    config.tab_strip.tab_width = 180;
    config.default_session = SessionConfig {
        host: "build01".to_string(),
        protocol: Protocol::Telnet,
        resize_policy: ResizePolicy::Either,
        close_on_exit: CloseOnExit::Always,
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_fields_take_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    fs::write(&path, "confirm_exit: false\ndefault_session:\n  host: db01\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.confirm_exit);
    assert!(config.confirm_paste);
    assert_eq!(config.default_session.host, "db01");
    assert_eq!(config.default_session.cols, 80);
    assert_eq!(config.default_session.rows, 24);
    assert_eq!(config.tab_strip, Config::default().tab_strip);
}

#[test]
fn test_invalid_values_are_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    fs::write(&path, "default_session:\n  rows: 0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().expect("typed error");
    assert!(matches!(config_err, ConfigError::Validation(msg) if msg.contains("default_session")));
}

#[test]
fn test_malformed_yaml_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    fs::write(&path, "tab_strip: [unterminated\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let err = Config::load_from(&temp.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io(_))
    ));
}

#[test]
fn test_config_path_is_under_config_dir() {
    assert_eq!(Config::config_path(), Config::config_dir().join("config.yaml"));
}
