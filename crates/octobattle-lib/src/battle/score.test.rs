use super::*;
use crate::testing::{profile, repo, repo_updated};

#[test]
fn test_default_policy_is_followers_times_three_plus_stars() {
    let policy = ScoringPolicy::default();

    let sdras = profile("sdras", 100);
    let sdras_repos = vec![repo("a", "sdras", 30), repo("b", "sdras", 20)];
    assert_eq!(policy.score(&sdras, &sdras_repos), 350);

    let tyler = profile("tylermcginnis", 80);
    let tyler_repos = vec![repo("c", "tylermcginnis", 40)];
    assert_eq!(policy.score(&tyler, &tyler_repos), 280);
}

#[test]
fn test_score_ignores_repo_order() {
    let policy = ScoringPolicy {
        recent_limit: Some(2),
        ..Default::default()
    };
    let player = profile("p", 1);
    let mut repos = vec![
        repo_updated("a", "p", 5, "2024-01-01T00:00:00Z"),
        repo_updated("b", "p", 7, "2024-03-01T00:00:00Z"),
        repo_updated("c", "p", 11, "2024-02-01T00:00:00Z"),
        repo("d", "p", 13),
    ];

    let forward = policy.score(&player, &repos);
    repos.reverse();
    let backward = policy.score(&player, &repos);

    assert_eq!(forward, backward);
}

#[test]
fn test_recent_limit_counts_newest_repositories() {
    let policy = ScoringPolicy {
        recent_limit: Some(2),
        ..Default::default()
    };
    let repos = vec![
        repo_updated("old", "p", 1000, "2019-01-01T00:00:00Z"),
        repo_updated("newer", "p", 7, "2024-03-01T00:00:00Z"),
        repo_updated("newest", "p", 11, "2024-05-01T00:00:00Z"),
        repo("undated", "p", 500),
    ];

    assert_eq!(policy.counted_stars(&repos), 18);
}

#[test]
fn test_recent_limit_larger_than_repo_count() {
    let policy = ScoringPolicy {
        recent_limit: Some(5),
        ..Default::default()
    };
    let repos = vec![repo("a", "p", 1), repo("b", "p", 2)];

    assert_eq!(policy.counted_stars(&repos), 3);
}

#[test]
fn test_repo_count_weight() {
    let policy = ScoringPolicy {
        follower_weight: 3,
        repo_count_weight: 1,
        recent_limit: Some(5),
    };
    let mut player = profile("p", 10);
    player.public_repos = 42;

    assert_eq!(policy.score(&player, &[repo("a", "p", 8)]), 30 + 42 + 8);
}

#[test]
fn test_empty_profile_scores_zero() {
    let policy = ScoringPolicy::default();

    assert_eq!(policy.score(&profile("empty", 0), &[]), 0);
}

#[test]
fn test_score_saturates_instead_of_overflowing() {
    let policy = ScoringPolicy::default();
    let player = profile("huge", u64::MAX / 2);
    let repos = vec![repo("a", "huge", u64::MAX), repo("b", "huge", 1)];

    assert_eq!(policy.score(&player, &repos), u64::MAX);
}
