//! Integration tests for the lazytodo-config crate.

use std::fs;
use std::path::PathBuf;

use lazytodo_config::persistence::find_config_file_in;
use lazytodo_config::{Backend, Config, ConfigError, LoggingConfig, StorageConfig};
use tempfile::TempDir;

#[tokio::test]
async fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lazytodo.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Keep everything in a JSON file next to the notes
            storage: {
                backend: "json",
                data_dir: "/srv/notes",
            },
            logging: { level: "debug", file: "/var/log/lazytodo.log" },
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.storage.backend, Backend::Json);
    assert_eq!(config.storage.data_dir, Some(PathBuf::from("/srv/notes")));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.logging.file,
        Some(PathBuf::from("/var/log/lazytodo.log"))
    );
}

#[tokio::test]
async fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let original = Config {
        storage: StorageConfig {
            backend: Backend::Sqlite,
            data_dir: Some(dir.path().join("data")),
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        },
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    assert_eq!(original, loaded);
}

#[tokio::test]
async fn config_load_nonexistent_fails() {
    let result = Config::load_from("/nonexistent/path/config.json");
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn empty_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lazytodo.json5");
    fs::write(&config_path, "{}").unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.storage.backend, Backend::Sqlite);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn unknown_backend_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lazytodo.json5");
    fs::write(&config_path, r#"{ storage: { backend: "redis" } }"#).unwrap();

    assert!(Config::load_from(&config_path).is_err());
}

#[test]
fn empty_data_dir_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lazytodo.json5");
    fs::write(&config_path, r#"{ storage: { data_dir: "" } }"#).unwrap();

    assert!(matches!(
        Config::load_from(&config_path),
        Err(ConfigError::EmptyDataDir)
    ));
}

#[test]
fn local_file_wins_over_user_file() {
    let local = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(user.path().join("config.json5"), "{}").unwrap();

    assert_eq!(
        find_config_file_in(local.path(), Some(user.path())),
        Some(user.path().join("config.json5"))
    );

    fs::write(local.path().join("lazytodo.json"), "{}").unwrap();
    assert_eq!(
        find_config_file_in(local.path(), Some(user.path())),
        Some(local.path().join("lazytodo.json"))
    );

    fs::write(local.path().join("lazytodo.json5"), "{}").unwrap();
    assert_eq!(
        find_config_file_in(local.path(), Some(user.path())),
        Some(local.path().join("lazytodo.json5"))
    );
}

#[test]
fn no_config_file_anywhere() {
    let local = TempDir::new().unwrap();
    assert_eq!(find_config_file_in(local.path(), None), None);
}

#[test]
fn log_file_defaults_to_data_dir() {
    let config = Config::default();
    let data_dir = PathBuf::from("/home/me/.lazytodo");
    assert_eq!(
        config.logging.log_file(&data_dir),
        data_dir.join("lazytodo.log")
    );
}

#[test]
fn absolute_data_dir_is_kept() {
    let storage = StorageConfig {
        backend: Backend::Json,
        data_dir: Some(PathBuf::from("/srv/notes")),
    };
    assert_eq!(
        storage.resolve_data_dir().unwrap(),
        PathBuf::from("/srv/notes")
    );
}
