//! Integration tests for salescope-config

use salescope_config::*;
use std::io::Write;
use std::time::Duration;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = SaleScopeConfig::default();
    assert!(config.validate_all().is_ok());
    assert_eq!(config.query.default_page_size, 10);
    assert_eq!(config.query.max_page_size, 100);
    assert_eq!(config.import.batch_size, 1000);
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("SALESCOPE_DATABASE_URL", Some("sqlite::memory:")),
        ("SALESCOPE_SERVER_PORT", Some("8088")),
        ("SALESCOPE_LOG_LEVEL", Some("debug")),
        ("SALESCOPE_LOG_FORMAT", Some("json")),
        ("SALESCOPE_ALLOWED_ORIGINS", Some("https://dash.example.com, http://localhost:4000")),
        ("SALESCOPE_MAX_PAGE_SIZE", Some("250")),
    ];

    with_vars(vars, || {
        let config = ConfigLoader::new().from_env().unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.server.cors.allowed_origins,
            vec!["https://dash.example.com", "http://localhost:4000"]
        );
        assert_eq!(config.query.max_page_size, 250);
    });
}

#[test]
fn test_invalid_env_value() {
    with_vars(vec![("SALESCOPE_SERVER_PORT", Some("not-a-port"))], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("SALESTEST_SERVER_BIND_ADDRESS", Some("127.0.0.1"))], || {
        let config = ConfigLoader::with_prefix("SALESTEST").from_env().unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1");
    });
}

#[test]
fn test_yaml_config_serialization() {
    let yaml = SaleScopeConfig::generate_sample();
    let parsed: SaleScopeConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
}

#[test]
fn test_load_from_yaml_file() {
    let yaml = r#"
server:
  bind_address: "127.0.0.1"
  port: 9000
  cors:
    allowed_origins:
      - "https://sales.example.com"
    max_age: 600

database:
  url: "sqlite://data/sales.db"
  max_connections: 4
  connection_timeout: 5

logging:
  level: warn
  format: compact
  targets:
    - type: console
    - type: file
      path: "logs/salescope.log"
      rotation: hourly

query:
  max_page_size: 50
"#;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    with_vars(vec![("SALESCOPE_SERVER_PORT", None::<&str>)], || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();

        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors.max_age, Duration::from_secs(600));
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.connection_timeout, Duration::from_secs(5));
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.targets.len(), 2);
        assert!(matches!(
            config.logging.targets[1],
            LogTarget::File {
                rotation: LogRotation::Hourly,
                ..
            }
        ));
        assert_eq!(config.query.max_page_size, 50);
        assert_eq!(config.query.default_page_size, 10);
    });
}

#[test]
fn test_env_overrides_file_values() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"server:\n  port: 9000\n").unwrap();

    with_vars(vec![("SALESCOPE_SERVER_PORT", Some("9100"))], || {
        let config = ConfigLoader::new().load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9100);
    });
}

#[test]
fn test_invalid_file_rejected_by_validation() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"query:\n  default_page_size: 500\n  max_page_size: 100\n").unwrap();

    let result = ConfigLoader::new().from_file(file.path());
    assert!(matches!(result, Err(ConfigError::DomainError { .. })));
}
