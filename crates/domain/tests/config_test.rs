use tollgate_domain::config::LogFormat;
use tollgate_domain::{CliOverrides, Config, ConfigError};

#[test]
fn test_defaults_are_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.jobs.flush_interval_ms, 10_000);
    assert_eq!(config.logging.format, LogFormat::Text);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = Config::from_toml(
        r#"
        [server]
        port = 9000

        [jobs]
        reload_interval_ms = 500

        [logging]
        format = "json"
        "#,
    )
    .unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.jobs.reload_interval_ms, 500);
    assert_eq!(config.jobs.flush_interval_ms, 10_000);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.database.path, "./tollgate.db");
}

#[test]
fn test_unknown_log_format_fails_to_parse() {
    let result = Config::from_toml("[logging]\nformat = \"xml\"\n");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_overrides_take_precedence() {
    let mut config = Config::default();
    config.apply_overrides(CliOverrides {
        bind_address: Some("127.0.0.1".to_string()),
        port: Some(3000),
        database_path: Some(":memory:".to_string()),
        log_level: Some("debug".to_string()),
    });

    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert!(config.database.is_memory());
    assert_eq!(config.database.url(), "sqlite::memory:");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_validation_rejects_zero_port() {
    let mut config = Config::default();
    config.server.port = 0;

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validation_rejects_zero_interval() {
    let mut config = Config::default();
    config.jobs.flush_interval_ms = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_unknown_level() {
    let mut config = Config::default();
    config.logging.level = "verbose".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_missing_explicit_config_file_is_an_error() {
    let result = Config::load(Some("/nonexistent/tollgate.toml"), CliOverrides::default());

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}
