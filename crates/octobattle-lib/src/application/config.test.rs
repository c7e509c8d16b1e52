use super::*;

#[test]
fn test_string_defaults_match_typed_defaults() {
    let config = AppConfig::default();

    assert_eq!(defaults::LOG_LEVEL.parse::<u8>().unwrap(), config.log_level);
    assert_eq!(defaults::LOG_FORMAT.parse::<LogFormat>().unwrap(), config.log_format);
    assert_eq!(defaults::LOG_OUTPUT.parse::<LogOutput>().unwrap(), config.log_output);
    assert_eq!(defaults::NET_TIMEOUT.parse::<u64>().unwrap(), config.net_timeout);
    assert_eq!(defaults::MAX_JOBS.parse::<u32>().unwrap(), config.max_jobs);
    assert_eq!(
        defaults::BATTLE_TIMEOUT.parse::<u64>().unwrap(),
        config.battle_timeout
    );
    assert_eq!(defaults::COLOR.parse::<ColorIntent>().unwrap(), config.color);
    assert_eq!(defaults::OUTPUT.parse::<OutputFormat>().unwrap(), config.output);
    assert_eq!(
        defaults::SCORE_RECENT_REPOS.parse::<usize>().unwrap(),
        config.score_recent_repos
    );
    assert_eq!(
        defaults::SCORE_REPO_WEIGHT.parse::<u64>().unwrap(),
        config.score_repo_weight
    );
}

#[test]
fn test_default_config_is_valid() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_validation_rejects_zero_timeout() {
    let config = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("net_timeout"));
}

#[test]
fn test_validation_rejects_zero_jobs() {
    let config = AppConfig {
        max_jobs: 0,
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_validation_rejects_non_http_api_url() {
    let config = AppConfig {
        api_url: "ftp://example.com".to_string(),
        ..AppConfig::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_log_level_out_of_range() {
    let config = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_default_scoring_policy_counts_all_repos() {
    assert_eq!(AppConfig::default().scoring_policy(), ScoringPolicy::default());
}

#[test]
fn test_scoring_policy_from_config() {
    let config = AppConfig {
        score_recent_repos: 5,
        score_repo_weight: 2,
        ..AppConfig::default()
    };

    let policy = config.scoring_policy();
    assert_eq!(policy.recent_limit, Some(5));
    assert_eq!(policy.repo_count_weight, 2);
    assert_eq!(policy.follower_weight, 3);
}

#[test]
fn test_battle_timeout_zero_means_none() {
    assert_eq!(AppConfig::default().battle_timeout(), None);

    let config = AppConfig {
        battle_timeout: 12,
        ..AppConfig::default()
    };
    assert_eq!(config.battle_timeout(), Some(Duration::from_secs(12)));
}

#[test]
fn test_networking_config_carries_token_and_limits() {
    let config = AppConfig {
        github_token: Some("ghp_test".to_string()),
        max_jobs: 2,
        net_timeout: 5,
        log_level: 4,
        ..AppConfig::default()
    };

    let networking = config.to_networking_config();
    assert_eq!(networking.max_jobs, 2);
    assert_eq!(networking.timeout_seconds, 5);
    assert_eq!(networking.token.as_deref(), Some("ghp_test"));
    assert!(networking.trace_requests);
}

#[test]
fn test_logger_config_resolves_explicit_color() {
    let config = AppConfig {
        color: ColorIntent::Never,
        log_level: 2,
        ..AppConfig::default()
    };

    let logger = config.to_logger_config();
    assert!(!logger.color);
    assert_eq!(logger.level, LogLevel::Info);
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: AppConfig =
        serde_json::from_str(r#"{"max_jobs": 9, "output": "json"}"#).unwrap();

    assert_eq!(config.max_jobs, 9);
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.net_timeout, 30);
}
