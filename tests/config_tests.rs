use std::fs;

use schoolyard::error::{ConfigError, Error};
use schoolyard::infrastructure::config::settings::Config;

fn load(contents: &str) -> schoolyard::error::Result<Config> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    Config::load(&path)
}

#[test]
fn config_rejects_empty_database_url() {
    let toml = r#"
[database]
url = "  "
"#;

    match Config::parse_toml_with_env(toml, |_| None) {
        Err(Error::Config(ConfigError::MissingField {
            field: "database.url",
        })) => {}
        Err(err) => panic!("Expected missing database url, got {err}"),
        Ok(config) => panic!(
            "Expected blank url to be rejected, got {:?}",
            config.database.url
        ),
    }
}

#[test]
fn config_rejects_zero_upload_limit() {
    let toml = r#"
[uploads]
max_bytes = 0
"#;

    match load(toml) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "uploads.max_bytes",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid max_bytes, got {err}"),
        Ok(config) => panic!(
            "Expected zero limit to be rejected, got {}",
            config.uploads.max_bytes
        ),
    }
}

#[test]
fn config_rejects_non_image_types() {
    let toml = r#"
[uploads]
allowed_types = ["image/png", "application/pdf"]
"#;

    let err = load(toml).unwrap_err();
    assert!(
        err.to_string().contains("application/pdf"),
        "unexpected error: {err}"
    );
}

#[test]
fn config_reports_parse_errors() {
    let err = load("[server\nport = 1").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))), "{err}");
}

#[test]
fn missing_explicit_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))), "{err}");
}

#[test]
fn missing_default_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config::load_or_default(dir.path().join("config.toml")).unwrap();
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.uploads.public_path, "/schoolImages");
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = load("[server]\nport = 8080\n").unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "127.0.0.1");
    assert!(config.server.cors);
    assert_eq!(config.database.max_connections, 8);
}
