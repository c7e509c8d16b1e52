use super::*;
use crate::api::github::MockGithubProvider;
use crate::testing::{profile, repo};
use tokio::sync::Notify;

async fn sdras_and_tyler() -> MockGithubProvider {
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
async fn test_higher_score_wins() {
    let resolver = BattleResolver::new(Arc::new(sdras_and_tyler().await));

    let result = resolver
        .resolve(&BattleRequest::new("sdras", "tylermcginnis"))
        .await
        .unwrap();

    assert_eq!(result.winner.profile.login, "sdras");
    assert_eq!(result.winner.score, 350);
    assert_eq!(result.loser.profile.login, "tylermcginnis");
    assert_eq!(result.loser.score, 280);
    assert!(!result.is_tie());
}

#[tokio::test]
async fn test_swapped_players_agree() {
    let resolver = BattleResolver::new(Arc::new(sdras_and_tyler().await));

    let forward = resolver
        .resolve(&BattleRequest::new("sdras", "tylermcginnis"))
        .await
        .unwrap();
    let backward = resolver
        .resolve(&BattleRequest::new("tylermcginnis", "sdras"))
        .await
        .unwrap();

    assert_eq!(forward, backward);
}

#[tokio::test]
async fn test_tie_keeps_request_order() {
    let provider = MockGithubProvider::new()
        .with_user(profile("left", 2), vec![repo("x", "left", 4)])
        .await
        .with_user(profile("right", 1), vec![repo("y", "right", 7)])
        .await;
    let resolver = BattleResolver::new(Arc::new(provider));

    let result = resolver
        .resolve(&BattleRequest::new("right", "left"))
        .await
        .unwrap();

    assert!(result.is_tie());
    assert_eq!(result.winner.profile.login, "right");
    assert_eq!(result.loser.profile.login, "left");
}

#[tokio::test]
async fn test_unknown_player_is_named() {
    let provider = MockGithubProvider::new()
        .with_user(profile("known", 1), vec![])
        .await;
    let resolver = BattleResolver::new(Arc::new(provider));

    let err = resolver
        .resolve(&BattleRequest::new("ghost", "known"))
        .await
        .unwrap_err();

    assert!(matches!(err, BattleError::UnknownPlayer { ref player } if player.as_str() == "ghost"));
    assert_eq!(err.to_string(), "ghost doesn't exist");
}

#[tokio::test]
async fn test_provider_failure_names_player() {
    let provider = MockGithubProvider::new()
        .with_user(profile("one", 1), vec![])
        .await
        .with_profile("two", Ok(profile("two", 1)))
        .await
        .with_repos("two", Err("server error".to_string()))
        .await;
    let resolver = BattleResolver::new(Arc::new(provider));

    let err = resolver
        .resolve(&BattleRequest::new("one", "two"))
        .await
        .unwrap_err();

    assert!(matches!(err, BattleError::FetchFailed { ref player, .. } if player.as_str() == "two"));
}

#[tokio::test]
async fn test_empty_player_fails_without_fetching() {
    let provider = Arc::new(MockGithubProvider::new());
    let resolver = BattleResolver::new(provider.clone());

    let err = resolver
        .resolve(&BattleRequest::new("", "someone"))
        .await
        .unwrap_err();

    assert!(matches!(err, BattleError::EmptyPlayer { slot: "Player One" }));
    assert!(provider.calls().await.is_empty());
}

#[tokio::test]
async fn test_all_fetches_are_issued_before_any_completes() {
    let gate_one = Arc::new(Notify::new());
    let gate_two = Arc::new(Notify::new());
    let provider = Arc::new(
        sdras_and_tyler()
            .await
            .with_gate("profile:sdras", gate_one.clone())
            .await
            .with_gate("profile:tylermcginnis", gate_two.clone())
            .await,
    );
    let resolver = BattleResolver::new(provider.clone());
    let request = BattleRequest::new("sdras", "tylermcginnis");

    let pending = resolver.resolve(&request);
    tokio::pin!(pending);
    let early = tokio::time::timeout(Duration::from_millis(20), &mut pending).await;
    assert!(early.is_err());

    let mut calls = provider.calls().await;
    calls.sort();
    assert_eq!(
        calls,
        vec![
            "profile:sdras",
            "profile:tylermcginnis",
            "repos:sdras",
            "repos:tylermcginnis",
        ]
    );

    gate_two.notify_one();
    gate_one.notify_one();
    assert_eq!(pending.await.unwrap().winner.profile.login, "sdras");
}

#[tokio::test]
async fn test_timeout_surfaces_as_error() {
    let gate = Arc::new(Notify::new());
    let provider = sdras_and_tyler()
        .await
        .with_gate("repos:tylermcginnis", gate)
        .await;
    let resolver =
        BattleResolver::new(Arc::new(provider)).with_timeout(Some(Duration::from_millis(20)));

    let err = resolver
        .resolve(&BattleRequest::new("sdras", "tylermcginnis"))
        .await
        .unwrap_err();

    assert!(matches!(err, BattleError::TimedOut { .. }));
}

#[tokio::test]
async fn test_policy_is_applied() {
    let provider = MockGithubProvider::new()
        .with_user(profile("a", 0), vec![repo("x", "a", 1)])
        .await
        .with_user(profile("b", 1), vec![])
        .await;
    let policy = ScoringPolicy {
        follower_weight: 0,
        ..Default::default()
    };
    let resolver = BattleResolver::new(Arc::new(provider)).with_policy(policy);

    let result = resolver
        .resolve(&BattleRequest::new("b", "a"))
        .await
        .unwrap();

    assert_eq!(result.winner.profile.login, "a");
    assert_eq!(resolver.policy().follower_weight, 0);
}
