use super::*;
use crate::api::github::MockGithubProvider;
use crate::battle::ScoredPlayer;
use crate::testing::{profile, repo};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

fn result_for(winner: &str, loser: &str) -> BattleResult {
    BattleResult::rank(
        ScoredPlayer {
            profile: profile(winner, 2),
            score: 6,
        },
        ScoredPlayer {
            profile: profile(loser, 1),
            score: 3,
        },
    )
}

#[test]
fn test_reduce_transitions() {
    let success = reduce(
        &BattleState::Loading,
        BattleAction::Resolved(result_for("a", "b")),
    );
    assert!(matches!(success, BattleState::Success(_)));

    let restarted = reduce(&success, BattleAction::Start);
    assert_eq!(restarted, BattleState::Loading);

    let failed = reduce(&restarted, BattleAction::Failed("nope".to_string()));
    assert_eq!(failed, BattleState::Error("nope".to_string()));
}

#[test]
fn test_machine_starts_loading_without_request() {
    let machine = BattleMachine::new();

    assert!(machine.current().is_loading());
    assert_eq!(machine.request(), None);
}

#[test]
fn test_start_then_resolve() {
    let machine = BattleMachine::new();
    let request = BattleRequest::new("a", "b");

    assert_eq!(machine.start(&request), StartOutcome::Started);
    assert_eq!(
        machine.on_resolved(&request, result_for("a", "b")),
        Completion::Applied
    );

    assert_eq!(machine.current(), BattleState::Success(result_for("a", "b")));
    assert_eq!(machine.request(), Some(request));
}

#[test]
fn test_completion_for_superseded_request_is_dropped() {
    let machine = BattleMachine::new();
    let first = BattleRequest::new("a", "b");
    let second = BattleRequest::new("c", "d");

    machine.start(&first);
    machine.start(&second);

    assert_eq!(
        machine.on_resolved(&first, result_for("a", "b")),
        Completion::Stale
    );
    assert!(machine.current().is_loading());
    assert_eq!(machine.on_failed(&first, "late"), Completion::Stale);
    assert!(machine.current().is_loading());

    assert_eq!(
        machine.on_resolved(&second, result_for("d", "c")),
        Completion::Applied
    );
    assert_eq!(machine.current(), BattleState::Success(result_for("d", "c")));
}

#[test]
fn test_terminal_state_ignores_second_completion() {
    let machine = BattleMachine::new();
    let request = BattleRequest::new("a", "b");

    machine.start(&request);
    machine.on_failed(&request, "first");

    assert_eq!(
        machine.on_resolved(&request, result_for("a", "b")),
        Completion::Stale
    );
    assert_eq!(machine.current(), BattleState::Error("first".to_string()));
}

#[test]
fn test_restarting_current_pair_is_noop() {
    let machine = BattleMachine::new();
    let request = BattleRequest::new("a", "b");

    machine.start(&request);
    machine.on_resolved(&request, result_for("a", "b"));
    let receiver = machine.subscribe();

    assert_eq!(machine.start(&request), StartOutcome::AlreadyCurrent);
    assert!(!receiver.has_changed().unwrap());
    assert!(matches!(machine.current(), BattleState::Success(_)));
}

#[test]
fn test_completion_before_any_start_is_stale() {
    let machine = BattleMachine::new();

    assert_eq!(
        machine.on_failed(&BattleRequest::new("a", "b"), "early"),
        Completion::Stale
    );
    assert!(machine.current().is_loading());
}

#[tokio::test]
async fn test_run_unknown_player_ends_in_error() {
    let provider = MockGithubProvider::new()
        .with_user(profile("known", 1), vec![])
        .await;
    let resolver = BattleResolver::new(Arc::new(provider));
    let machine = BattleMachine::new();
    let mut receiver = machine.subscribe();
    let request = BattleRequest::new("ghost", "known");

    assert_eq!(machine.run(&resolver, &request).await, Completion::Applied);

    assert_eq!(
        machine.current(),
        BattleState::Error("ghost doesn't exist".to_string())
    );
    assert!(receiver.has_changed().unwrap());
    assert_eq!(receiver.borrow_and_update().request, Some(request));
}

#[tokio::test]
async fn test_run_repeated_pair_does_not_refetch() {
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_user(profile("a", 1), vec![repo("x", "a", 1)])
            .await
            .with_user(profile("b", 1), vec![])
            .await,
    );
    let resolver = BattleResolver::new(provider.clone());
    let machine = BattleMachine::new();
    let request = BattleRequest::new("a", "b");

    assert_eq!(machine.run(&resolver, &request).await, Completion::Applied);
    assert_eq!(machine.run(&resolver, &request).await, Completion::Unchanged);

    assert_eq!(provider.call_count("profile:a").await, 1);
}

#[tokio::test]
async fn test_newer_battle_wins_over_slow_older_one() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_user(profile("a", 100), vec![])
            .await
            .with_user(profile("b", 1), vec![])
            .await
            .with_user(profile("c", 1), vec![])
            .await
            .with_user(profile("d", 50), vec![])
            .await
            .with_gate("profile:a", gate.clone())
            .await,
    );
    let resolver = BattleResolver::new(provider);
    let machine = BattleMachine::new();
    let slow = BattleRequest::new("a", "b");
    let fast = BattleRequest::new("c", "d");

    let first = machine.run(&resolver, &slow);
    tokio::pin!(first);
    let early = tokio::time::timeout(Duration::from_millis(20), &mut first).await;
    assert!(early.is_err());

    assert_eq!(machine.run(&resolver, &fast).await, Completion::Applied);
    gate.notify_one();
    assert_eq!(first.await, Completion::Stale);

    let BattleState::Success(result) = machine.current() else {
        panic!("expected success, got {:?}", machine.current());
    };
    assert_eq!(result.winner.profile.login, "d");
    assert_eq!(machine.request(), Some(fast));
}

#[test]
fn test_state_serializes_with_status_tag() {
    let json = serde_json::to_value(BattleState::Error("boom".to_string())).unwrap();

    assert_eq!(json["status"], "error");
    assert_eq!(json["detail"], "boom");
}
