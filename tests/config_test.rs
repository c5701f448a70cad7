//! Tests for server configuration loading.

use std::io::Write;
use wordgame::{GameRegistry, RegistrySettings, ServerConfig};

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8080);
    assert_eq!(*config.queue_capacity(), 64);
    assert_eq!(*config.seed(), None);
    assert_eq!(config.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = ServerConfig::from_toml("").expect("Empty config should parse");
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_partial_toml_overrides_fields() {
    let config = ServerConfig::from_toml("port = 9000\nseed = 42\n").expect("Parse failed");
    assert_eq!(*config.port(), 9000);
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(config.host(), "127.0.0.1");
}

#[test]
fn test_zero_queue_capacity_rejected() {
    let err = ServerConfig::from_toml("queue_capacity = 0").unwrap_err();
    assert!(err.message.contains("queue_capacity"));
}

#[test]
fn test_malformed_toml_rejected() {
    let err = ServerConfig::from_toml("port = \"eighty\"").unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(
        file,
        "host = \"0.0.0.0\"\nport = 3000\nqueue_capacity = 4\nseed = 9"
    )
    .expect("Failed to write config");

    let config = ServerConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    assert_eq!(*config.queue_capacity(), 4);

    let settings = RegistrySettings::from(&config);
    assert_eq!(*settings.queue_capacity(), 4);
    assert_eq!(*settings.seed(), Some(9));
}

#[test]
fn test_missing_file_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_setters_override() {
    let config = ServerConfig::default()
        .with_host("0.0.0.0".to_string())
        .with_port(1234);
    assert_eq!(config.bind_addr(), "0.0.0.0:1234");
}

#[tokio::test]
async fn test_registry_from_config() {
    let config = ServerConfig::from_toml("queue_capacity = 2\nseed = 5").expect("Parse failed");
    let registry = GameRegistry::new(RegistrySettings::from(&config));
    assert_eq!(*registry.settings().queue_capacity(), 2);
    assert!(registry.is_empty().await);
}
