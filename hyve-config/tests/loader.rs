use std::{fs, time::Duration};

use hyve_config::{
    ConfigGuardRailError, ConfigLoadError, ConfigLoader,
    models::ValueSource,
};
use tempfile::tempdir;

const NO_ENV: [(&str, &str); 0] = [];

#[test]
fn defaults_without_any_source() {
    let load = ConfigLoader::new().with_environment(NO_ENV).load().unwrap();

    assert_eq!(load.config.api_base(), "http://localhost:8000");
    assert_eq!(load.config.request_timeout, Duration::from_secs(10));
    assert!(load.config.images.is_empty());
    assert_eq!(load.config.metadata.api_url_source, ValueSource::Default);
    assert!(load.warnings.is_empty());
}

#[test]
fn file_values_are_applied() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("hyve.toml");
    fs::write(
        &path,
        r#"
api_url = "https://recommender.example.com/"
request_timeout = "5s"

[images]
defaults = ["https://img.example.com/default.jpg"]

[images.locations]
"Austin, TX" = "https://img.example.com/austin.jpg"
"#,
    )
    .unwrap();

    let load = ConfigLoader::new()
        .with_environment(NO_ENV)
        .with_config_path(&path)
        .load()
        .unwrap();

    assert_eq!(load.config.api_base(), "https://recommender.example.com");
    assert_eq!(load.config.request_timeout, Duration::from_secs(5));
    assert_eq!(
        load.config.images.locations.get("Austin, TX").map(String::as_str),
        Some("https://img.example.com/austin.jpg")
    );
    assert_eq!(load.config.metadata.request_timeout_source, ValueSource::File);
    assert_eq!(load.config.metadata.config_path.as_deref(), Some(path.as_path()));
}

#[test]
fn environment_and_overrides_take_precedence() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("hyve.toml");
    fs::write(&path, "api_url = \"http://file-host:1\"\nrequest_timeout = \"3s\"\n")
        .unwrap();

    let load = ConfigLoader::new()
        .with_environment([
            ("HYVE_API_URL", "http://127.0.0.1:9000"),
            ("HYVE_REQUEST_TIMEOUT", "7s"),
        ])
        .with_config_path(&path)
        .with_request_timeout(Some("2s".into()))
        .load()
        .unwrap();

    assert_eq!(load.config.api_base(), "http://127.0.0.1:9000");
    assert_eq!(load.config.metadata.api_url_source, ValueSource::Environment);
    assert_eq!(load.config.request_timeout, Duration::from_secs(2));
    assert_eq!(
        load.config.metadata.request_timeout_source,
        ValueSource::Override
    );
}

#[test]
fn env_file_fills_missing_variables_only() {
    let dir = tempdir().expect("tempdir");
    let env_path = dir.path().join(".env");
    fs::write(
        &env_path,
        "HYVE_API_URL=http://127.0.0.1:7000\nHYVE_REQUEST_TIMEOUT=4s\n",
    )
    .unwrap();

    let load = ConfigLoader::new()
        .with_environment([("HYVE_REQUEST_TIMEOUT", "6s")])
        .with_env_file(&env_path)
        .load()
        .unwrap();

    assert_eq!(load.config.api_base(), "http://127.0.0.1:7000");
    assert_eq!(load.config.request_timeout, Duration::from_secs(6));
    assert_eq!(load.config.metadata.env_file.as_deref(), Some(env_path.as_path()));
}

#[test]
fn config_path_can_come_from_environment() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("from-env.toml");
    fs::write(&path, "request_timeout = \"8s\"\n").unwrap();

    let load = ConfigLoader::new()
        .with_environment([("HYVE_CONFIG", path.display().to_string())])
        .load()
        .unwrap();

    assert_eq!(load.config.request_timeout, Duration::from_secs(8));
}

#[test]
fn invalid_values_are_reported() {
    let err = ConfigLoader::new()
        .with_environment([("HYVE_REQUEST_TIMEOUT", "eventually")])
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::InvalidTimeout { .. }));

    let err = ConfigLoader::new()
        .with_environment(NO_ENV)
        .with_request_timeout(Some("0s".into()))
        .load()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::GuardRail(ConfigGuardRailError::ZeroTimeout)
    ));

    let err = ConfigLoader::new()
        .with_environment(NO_ENV)
        .with_api_url(Some("ftp://files.example.com".into()))
        .load()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::GuardRail(ConfigGuardRailError::UnsupportedScheme { .. })
    ));
}

#[test]
fn unknown_file_keys_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("typo.toml");
    fs::write(&path, "api_ulr = \"http://localhost:8000\"\n").unwrap();

    let err = ConfigLoader::new()
        .with_environment(NO_ENV)
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::ConfigFileParse { .. }));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = ConfigLoader::new()
        .with_environment(NO_ENV)
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::ConfigFileIo { .. }));
}
