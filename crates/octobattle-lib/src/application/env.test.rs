use super::*;

fn env_with(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .unwrap()
}

#[test]
fn test_no_color_environment_variable() {
    let env_config = env_with(&[("NO_COLOR", "1")]);

    assert_eq!(
        env_config.apply_color_config(ColorIntent::Auto),
        ColorIntent::Never
    );
}

#[test]
fn test_force_color_environment_variable() {
    let env_config = env_with(&[("FORCE_COLOR", "1")]);

    assert_eq!(
        env_config.apply_color_config(ColorIntent::Auto),
        ColorIntent::Always
    );
}

#[test]
fn test_environment_variable_precedence() {
    let env_config = env_with(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);

    // FORCE_COLOR=1 wins over NO_COLOR and CLICOLOR
    assert_eq!(
        env_config.apply_color_config(ColorIntent::Auto),
        ColorIntent::Always
    );
}

#[test]
fn test_ci_environment_variable() {
    let env_config = env_with(&[("CI", "true"), ("FORCE_COLOR", "1")]);

    assert_eq!(
        env_config.apply_color_config(ColorIntent::Always),
        ColorIntent::Never
    );
}

#[test]
fn test_empty_no_color_is_ignored() {
    let env_config = env_with(&[("NO_COLOR", "")]);

    assert_eq!(
        env_config.apply_color_config(ColorIntent::Auto),
        ColorIntent::Auto
    );
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let env_config = env_with(&[("FORCE_COLOR", "invalid")]);

    assert_eq!(
        env_config.apply_color_config(ColorIntent::Never),
        ColorIntent::Never
    );
}

#[test]
fn test_unrelated_variables_leave_color_alone() {
    let env_config = env_with(&[("HOME", "/root"), ("TERM", "xterm")]);

    assert_eq!(
        env_config.apply_color_config(ColorIntent::Always),
        ColorIntent::Always
    );
}
