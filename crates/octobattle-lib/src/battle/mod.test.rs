use super::*;
use crate::testing::profile;

fn scored(login: &str, score: u64) -> ScoredPlayer {
    ScoredPlayer {
        profile: profile(login, 0),
        score,
    }
}

#[test]
fn test_from_query_reads_both_players() {
    let request = BattleRequest::from_query("?playerOne=sdras&playerTwo=tylermcginnis").unwrap();

    assert_eq!(request, BattleRequest::new("sdras", "tylermcginnis"));
}

#[test]
fn test_from_query_decodes_and_ignores_extra_keys() {
    let request =
        BattleRequest::from_query("theme=dark&playerTwo=a%2Db&flag&playerOne=+c+").unwrap();

    assert_eq!(request.player_one.as_str(), "c");
    assert_eq!(request.player_two.as_str(), "a-b");
}

#[test]
fn test_from_query_missing_player() {
    let err = BattleRequest::from_query("playerOne=sdras").unwrap_err();

    assert!(matches!(err, BattleError::InvalidQuery { ref reason } if reason == "missing playerTwo"));
}

#[test]
fn test_from_query_rejects_invalid_utf8() {
    let err = BattleRequest::from_query("playerOne=%FF&playerTwo=b").unwrap_err();

    assert!(matches!(err, BattleError::InvalidQuery { .. }));
}

#[test]
fn test_validate_names_empty_slot() {
    let err = BattleRequest::new("sdras", "  ").validate().unwrap_err();

    assert_eq!(err.to_string(), "Player Two is required");
    assert!(BattleRequest::new("a", "b").validate().is_ok());
}

#[test]
fn test_rank_is_argument_order_independent_when_scores_differ() {
    let forward = BattleResult::rank(scored("a", 10), scored("b", 20));
    let backward = BattleResult::rank(scored("b", 20), scored("a", 10));

    assert_eq!(forward, backward);
    assert_eq!(forward.winner.profile.login, "b");
    assert!(!forward.is_tie());
}

#[test]
fn test_rank_tie_keeps_first_in_winner_slot() {
    let result = BattleResult::rank(scored("first", 7), scored("second", 7));

    assert!(result.is_tie());
    assert_eq!(result.winner.profile.login, "first");
    assert_eq!(result.loser.profile.login, "second");
}

#[test]
fn test_not_found_becomes_unknown_player() {
    let player = Player::new("ghost");
    let err = BattleError::for_player(
        &player,
        GithubError::NotFound {
            resource: "ghost".to_string(),
        },
    );

    assert_eq!(err.to_string(), "ghost doesn't exist");
}

#[test]
fn test_other_failures_name_the_player() {
    let player = Player::new("sdras");
    let err = BattleError::for_player(
        &player,
        GithubError::Provider {
            message: "boom".to_string(),
        },
    );

    assert!(matches!(err, BattleError::FetchFailed { .. }));
    assert_eq!(
        err.to_string(),
        "There was an error fetching data for sdras: Provider error: boom"
    );
}
