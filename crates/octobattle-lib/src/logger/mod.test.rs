use super::*;

#[test]
fn test_filter_directives_scope_crate_and_quiet_dependencies() {
    let directives = filter_directives(LogLevel::Debug);

    assert!(directives.starts_with("octobattle=debug,"));
    assert!(directives.contains("reqwest=warn"));
    assert!(directives.contains("hyper_util=warn"));
    assert!(directives.ends_with(",debug"));
}

#[test]
fn test_filter_directives_parse_as_env_filter() {
    for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace] {
        let directives = filter_directives(level);
        assert!(
            EnvFilter::try_new(&directives).is_ok(),
            "directives should parse: {directives}"
        );
    }
}

#[test]
fn test_spinner_spans_enabled_at_default_level() {
    let level = LogLevel::from_verbosity(crate::application::AppConfig::default().log_level);
    let subscriber =
        tracing_subscriber::registry().with(EnvFilter::new(filter_directives(level)));

    tracing::subscriber::with_default(subscriber, || {
        assert!(!crate::progress_span!("Battling").is_disabled());
        assert!(!crate::progress_span!(format!("Fetching {} repos", "Ruby")).is_disabled());
        assert!(tracing::info_span!("chatter").is_disabled());
    });
}

#[test]
fn test_progress_directive_present_at_every_level() {
    for level in [LogLevel::Error, LogLevel::Trace] {
        assert!(filter_directives(level).contains("octobattle::progress=info"));
    }
}

#[test]
fn test_spinner_template_is_valid() {
    assert!(ProgressStyle::with_template(SPINNER_TEMPLATE).is_ok());
}
