use super::*;
use crate::api::github::MockGithubProvider;
use crate::application::config::AppConfig;
use crate::display::StyleManager;
use crate::testing::{profile, repo};
use std::sync::Arc;

fn session_with(provider: MockGithubProvider, config: AppConfig) -> CommandSession<MockGithubProvider> {
    CommandSession::new(config, Arc::new(provider)).with_styling(StyleManager::plain())
}

fn json_config() -> AppConfig {
    AppConfig {
        output: OutputFormat::Json,
        ..AppConfig::default()
    }
}

async fn battle_provider() -> MockGithubProvider {
    MockGithubProvider::new()
        .with_user(
            profile("sdras", 100),
            vec![repo("a", "sdras", 30), repo("b", "sdras", 20)],
        )
        .await
        .with_user(
            profile("tylermcginnis", 80),
            vec![repo("c", "tylermcginnis", 40)],
        )
        .await
}

#[tokio::test]
async fn test_popular_defaults_to_all() {
    let provider = MockGithubProvider::new()
        .with_popular("All", Ok(vec![repo("freeCodeCamp", "freeCodeCamp", 400000)]))
        .await;
    let session = session_with(provider, AppConfig::default());

    let output = execute_command_with_session(Commands::Popular { languages: vec![] }, &session)
        .await
        .unwrap();

    assert!(output.starts_with("Popular All repositories"));
    assert!(output.contains("#1 | freeCodeCamp"));
}

#[tokio::test]
async fn test_popular_repeated_language_is_fetched_once() {
    let provider = MockGithubProvider::new()
        .with_popular("Ruby", Ok(vec![repo("rails", "rails", 1)]))
        .await;
    let session = session_with(provider.clone(), AppConfig::default());

    let output = execute_command_with_session(
        Commands::Popular {
            languages: vec!["Ruby".to_string(), "Ruby".to_string()],
        },
        &session,
    )
    .await
    .unwrap();

    assert_eq!(provider.call_count("popular:Ruby").await, 1);
    assert_eq!(output.matches("Popular Ruby repositories").count(), 2);
}

#[tokio::test]
async fn test_popular_failure_is_rendered_not_raised() {
    let provider = MockGithubProvider::new()
        .with_popular("Java", Err("API rate limit exceeded".to_string()))
        .await;
    let session = session_with(provider, AppConfig::default());

    let output = execute_command_with_session(
        Commands::Popular {
            languages: vec!["Java".to_string()],
        },
        &session,
    )
    .await
    .unwrap();

    assert!(output.starts_with("✗ There was an error fetching the Java repositories"));
    assert!(output.contains("API rate limit exceeded"));
}

#[tokio::test]
async fn test_popular_blank_language_is_an_error() {
    let provider = MockGithubProvider::new()
        .with_popular("Ruby", Ok(vec![repo("rails", "rails", 1)]))
        .await;
    let session = session_with(provider.clone(), AppConfig::default());

    let err = execute_command_with_session(
        Commands::Popular {
            languages: vec!["Ruby".to_string(), "  ".to_string()],
        },
        &session,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Language name is required");
    assert!(provider.calls().await.is_empty());
}

#[tokio::test]
async fn test_popular_json_output() {
    let provider = MockGithubProvider::new()
        .with_popular("All", Ok(vec![repo("r1", "a", 1)]))
        .await
        .with_popular("Ruby", Ok(vec![repo("r2", "b", 1)]))
        .await;
    let session = session_with(provider, json_config());

    let output = execute_command_with_session(
        Commands::Popular {
            languages: vec!["All".to_string(), "Ruby".to_string()],
        },
        &session,
    )
    .await
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["results"]["All"][0]["name"], "r1");
    assert_eq!(value["results"]["Ruby"][0]["name"], "r2");
    assert!(value["error"].is_null());
}

#[tokio::test]
async fn test_battle_positional_players() {
    let session = session_with(battle_provider().await, AppConfig::default());

    let output = execute_command_with_session(
        Commands::Battle {
            player_one: Some("tylermcginnis".to_string()),
            player_two: Some("sdras".to_string()),
            query: None,
        },
        &session,
    )
    .await
    .unwrap();

    assert!(output.starts_with("Winner sdras"));
    assert!(output.contains("Score: 350"));
    assert!(output.contains("Loser tylermcginnis"));
    assert!(output.contains("Score: 280"));
}

#[tokio::test]
async fn test_battle_from_query_json() {
    let session = session_with(battle_provider().await, json_config());

    let output = execute_command_with_session(
        Commands::Battle {
            player_one: None,
            player_two: None,
            query: Some("playerOne=sdras&playerTwo=tylermcginnis".to_string()),
        },
        &session,
    )
    .await
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["request"]["player_one"], "sdras");
    assert_eq!(value["state"]["status"], "success");
    assert_eq!(value["state"]["detail"]["winner"]["score"], 350);
    assert_eq!(value["state"]["detail"]["loser"]["profile"]["login"], "tylermcginnis");
}

#[tokio::test]
async fn test_battle_unknown_player_renders_error() {
    let session = session_with(battle_provider().await, AppConfig::default());

    let output = execute_command_with_session(
        Commands::Battle {
            player_one: Some("ghost".to_string()),
            player_two: Some("sdras".to_string()),
            query: None,
        },
        &session,
    )
    .await
    .unwrap();

    assert_eq!(output, "✗ ghost doesn't exist");
}

#[tokio::test]
async fn test_battle_invalid_query_is_an_error() {
    let session = session_with(battle_provider().await, AppConfig::default());

    let err = execute_command_with_session(
        Commands::Battle {
            player_one: None,
            player_two: None,
            query: Some("playerOne=sdras".to_string()),
        },
        &session,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("Invalid battle request"));
}

#[tokio::test]
async fn test_languages_lists_defaults() {
    let session = session_with(MockGithubProvider::new(), AppConfig::default());

    let output = execute_command_with_session(Commands::Languages, &session)
        .await
        .unwrap();

    assert_eq!(
        output,
        "• All\n• JavaScript\n• Ruby\n• Java\n• CSS\n• Python"
    );
}

#[tokio::test]
async fn test_version_json() {
    let session = session_with(MockGithubProvider::new(), json_config());

    let output = execute_command_with_session(Commands::Version, &session)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["name"], "octobattle");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}
