//! End-to-end flows against a local mock of the GitHub REST API

use mockito::{Matcher, Server, ServerGuard};
use octobattle_lib::application::{AppConfig, CommandSession, Commands, execute_command_with_session};
use octobattle_lib::battle::{BattleMachine, BattleRequest, BattleResolver, BattleState, Completion};
use octobattle_lib::popular::{PopularLoader, RequestOutcome};
use octobattle_lib::{ColorIntent, Language, LiveGithubClient, NetworkingConfig, NetworkingManager};
use std::sync::Arc;

fn live_client(server: &ServerGuard) -> Arc<LiveGithubClient> {
    let networking = Arc::new(NetworkingManager::new(NetworkingConfig::default()).unwrap());
    Arc::new(LiveGithubClient::with_base_url(networking, server.url()))
}

async fn mock_user(server: &mut ServerGuard, login: &str, followers: u64, stars: &[u64]) {
    let profile = serde_json::json!({
        "login": login,
        "name": null,
        "avatar_url": format!("https://avatars.example/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "followers": followers,
        "following": 1,
        "public_repos": stars.len(),
    });
    let repos: Vec<_> = stars
        .iter()
        .enumerate()
        .map(|(i, count)| {
            serde_json::json!({
                "id": i,
                "name": format!("{login}-repo-{i}"),
                "owner": {"login": login},
                "stargazers_count": count,
            })
        })
        .collect();

    server
        .mock("GET", format!("/users/{login}").as_str())
        .with_status(200)
        .with_body(profile.to_string())
        .create_async()
        .await;
    server
        .mock("GET", format!("/users/{login}/repos").as_str())
        .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
        .with_status(200)
        .with_body(serde_json::Value::from(repos).to_string())
        .create_async()
        .await;
}

#[tokio::test]
async fn test_popular_languages_are_cached_per_session() {
    let mut server = Server::new_async().await;
    let all = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::UrlEncoded("q".into(), "stars:>1".into()))
        .with_status(200)
        .with_body(r#"{"items": [{"id": 1, "name": "r1", "owner": {"login": "a"}}]}"#)
        .expect(1)
        .create_async()
        .await;
    let ruby = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "stars:>1 language:Ruby".into(),
        ))
        .with_status(200)
        .with_body(r#"{"items": [{"id": 2, "name": "r2", "owner": {"login": "b"}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let loader = PopularLoader::new(live_client(&server));
    for language in ["All", "Ruby", "All"] {
        loader.request(&Language::new(language)).await;
    }

    let state = loader.store().state();
    assert_eq!(state.results(&Language::all()).unwrap()[0].name, "r1");
    assert_eq!(state.results(&Language::new("Ruby")).unwrap()[0].name, "r2");
    assert_eq!(state.error(), None);
    all.assert_async().await;
    ruby.assert_async().await;
}

#[tokio::test]
async fn test_popular_http_failure_lands_in_store() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"message": "API rate limit exceeded"}"#)
        .create_async()
        .await;

    let loader = PopularLoader::new(live_client(&server));
    let outcome = loader.request(&Language::new("Python")).await;

    assert!(matches!(outcome, RequestOutcome::Failed { .. }));
    let state = loader.store().state();
    let error = state.error().unwrap();
    assert!(error.contains("Python"));
    assert!(error.contains("API rate limit exceeded"));
}

#[tokio::test]
async fn test_battle_resolves_against_live_client() {
    let mut server = Server::new_async().await;
    mock_user(&mut server, "sdras", 100, &[30, 20]).await;
    mock_user(&mut server, "tylermcginnis", 80, &[40]).await;

    let resolver = BattleResolver::new(live_client(&server));
    let result = resolver
        .resolve(&BattleRequest::new("tylermcginnis", "sdras"))
        .await
        .unwrap();

    assert_eq!(result.winner.profile.login, "sdras");
    assert_eq!(result.winner.score, 350);
    assert_eq!(result.loser.profile.login, "tylermcginnis");
    assert_eq!(result.loser.score, 280);
}

#[tokio::test]
async fn test_battle_with_missing_user_ends_in_error() {
    let mut server = Server::new_async().await;
    mock_user(&mut server, "sdras", 100, &[30, 20]).await;
    server
        .mock("GET", Matcher::Regex(r"^/users/ghost".to_string()))
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let resolver = BattleResolver::new(live_client(&server));
    let machine = BattleMachine::new();
    let completion = machine
        .run(&resolver, &BattleRequest::new("ghost", "sdras"))
        .await;

    assert_eq!(completion, Completion::Applied);
    assert_eq!(
        machine.current(),
        BattleState::Error("ghost doesn't exist".to_string())
    );
}

#[tokio::test]
async fn test_battle_command_end_to_end() {
    let mut server = Server::new_async().await;
    mock_user(&mut server, "left", 2, &[4]).await;
    mock_user(&mut server, "right", 1, &[7]).await;

    let config = AppConfig {
        api_url: server.url(),
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    let session = CommandSession::live(config).unwrap();

    let output = execute_command_with_session(
        Commands::Battle {
            player_one: None,
            player_two: None,
            query: Some("playerOne=right&playerTwo=left".to_string()),
        },
        &session,
    )
    .await
    .unwrap();

    assert!(output.starts_with("Tie right"));
    assert!(output.contains("Tie left"));
    assert!(output.contains("Score: 10"));
}
