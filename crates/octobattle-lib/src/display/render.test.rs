use super::*;
use crate::popular::{PopularAction, reduce};
use crate::testing::{profile, repo};

fn listing_with(language: &str, repos: Vec<crate::api::github::Repository>) -> ListingState {
    reduce(
        &ListingState::default(),
        PopularAction::Success {
            language: Language::new(language),
            repos,
        },
    )
}

fn scored(login: &str, score: u64) -> ScoredPlayer {
    ScoredPlayer {
        profile: profile(login, 10),
        score,
    }
}

#[test]
fn test_listing_loading_line() {
    let rendered = render_listing(
        &Language::new("Ruby"),
        &ListingState::default(),
        &StyleManager::plain(),
    );

    assert_eq!(rendered, "→ Fetching Ruby repos");
}

#[test]
fn test_listing_ranks_repositories_in_provider_order() {
    let state = listing_with(
        "Ruby",
        vec![repo("rails", "rails", 55000), repo("jekyll", "jekyll", 48000)],
    );

    let rendered = render_listing(&Language::new("Ruby"), &state, &StyleManager::plain());

    assert!(rendered.starts_with("Popular Ruby repositories"));
    let rails = rendered.find("#1 | rails").unwrap();
    let jekyll = rendered.find("#2 | jekyll").unwrap();
    assert!(rails < jekyll);
    assert!(rendered.contains("@rails"));
    assert!(rendered.contains("55000"));
}

#[test]
fn test_listing_error_is_shown_with_earlier_results() {
    let state = reduce(
        &listing_with("All", vec![repo("r1", "a", 1)]),
        PopularAction::Error {
            message: "There was an error fetching the Java repositories".to_string(),
        },
    );

    let all = render_listing(&Language::all(), &state, &StyleManager::plain());
    assert!(all.starts_with("✗ There was an error fetching the Java repositories"));
    assert!(all.contains("r1"));

    let java = render_listing(&Language::new("Java"), &state, &StyleManager::plain());
    assert_eq!(java, "✗ There was an error fetching the Java repositories");
}

#[test]
fn test_listing_without_repositories() {
    let state = listing_with("CSS", vec![]);

    let rendered = render_listing(&Language::new("CSS"), &state, &StyleManager::plain());

    assert_eq!(rendered, "Popular CSS repositories\nNo repositories");
}

#[test]
fn test_battle_loading_and_error() {
    let styling = StyleManager::plain();

    assert_eq!(render_battle(&BattleState::Loading, &styling), "→ Battling");
    assert_eq!(
        render_battle(&BattleState::Error("ghost doesn't exist".to_string()), &styling),
        "✗ ghost doesn't exist"
    );
}

#[test]
fn test_battle_winner_and_loser_cards() {
    let result = BattleResult::rank(scored("sdras", 350), scored("tylermcginnis", 280));

    let rendered = render_battle(&BattleState::Success(result), &StyleManager::plain());

    let winner = rendered.find("Winner sdras").unwrap();
    let loser = rendered.find("Loser tylermcginnis").unwrap();
    assert!(winner < loser);
    assert!(rendered.contains("Score: 350"));
    assert!(rendered.contains("Score: 280"));
    assert!(rendered.contains("Followers: 10"));
    assert!(rendered.contains("https://github.com/sdras"));
}

#[test]
fn test_battle_tie_labels_both_players() {
    let result = BattleResult::rank(scored("a", 5), scored("b", 5));

    let rendered = render_battle(&BattleState::Success(result), &StyleManager::plain());

    assert!(rendered.contains("Tie a"));
    assert!(rendered.contains("Tie b"));
    assert!(!rendered.contains("Winner"));
}

#[test]
fn test_optional_profile_fields_are_listed_when_present() {
    let mut player = scored("octocat", 1);
    player.profile.name = Some("The Octocat".to_string());
    player.profile.location = Some("San Francisco".to_string());
    let result = BattleResult::rank(player, scored("other", 0));

    let rendered = render_battle(&BattleState::Success(result), &StyleManager::plain());

    assert!(rendered.contains("Name: The Octocat"));
    assert!(rendered.contains("Location: San Francisco"));
    assert!(!rendered.contains("Company:"));
}
