use super::*;
use crate::primitives::ColorIntent;
use std::fs;
use tempfile::TempDir;

fn env_with(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .unwrap()
}

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::resolve(AppConfig::default(), &EnvironmentConfig::default()).unwrap();

    assert_eq!(config.log_level, 0);
    assert_eq!(config.net_timeout, 30);
    assert_eq!(config.max_jobs, 4);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        max_jobs: 16,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.max_jobs, 16);
    assert_eq!(merged.net_timeout, 30);
}

#[test]
fn test_environment_color_applies_when_cli_is_default() {
    let config =
        AppConfig::resolve(AppConfig::default(), &env_with(&[("NO_COLOR", "1")])).unwrap();

    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_cli_color_overrides_environment() {
    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };

    let config = AppConfig::resolve(cli, &env_with(&[("NO_COLOR", "1")])).unwrap();

    assert_eq!(config.color, ColorIntent::Always);
}

#[test]
fn test_resolve_validates() {
    let cli = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };

    assert!(AppConfig::resolve(cli, &EnvironmentConfig::default()).is_err());
}

#[test]
fn test_missing_env_files_are_skipped() {
    let dir = TempDir::new().unwrap();

    assert!(load_env_files(dir.path()).unwrap().is_empty());
}

#[test]
fn test_env_local_takes_precedence_over_env() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env.local"),
        "OCTOBATTLE_LOADER_TEST_LAYERED=local\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".env"),
        "OCTOBATTLE_LOADER_TEST_LAYERED=shared\nOCTOBATTLE_LOADER_TEST_SHARED_ONLY=yes\n",
    )
    .unwrap();

    let loaded = load_env_files(dir.path()).unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(
        std::env::var("OCTOBATTLE_LOADER_TEST_LAYERED").unwrap(),
        "local"
    );
    assert_eq!(
        std::env::var("OCTOBATTLE_LOADER_TEST_SHARED_ONLY").unwrap(),
        "yes"
    );
}

#[test]
fn test_malformed_env_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "NOT VALID 'unterminated\n").unwrap();

    let err = load_env_files(dir.path()).unwrap_err();

    assert!(matches!(err, ConfigError::EnvFileError { .. }));
}
