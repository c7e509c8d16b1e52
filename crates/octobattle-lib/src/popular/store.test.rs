use super::*;
use crate::testing::repo;

fn success(language: &str, names: &[&str]) -> PopularAction {
    PopularAction::Success {
        language: Language::new(language),
        repos: names.iter().map(|n| repo(n, "owner", 1)).collect(),
    }
}

fn error(message: &str) -> PopularAction {
    PopularAction::Error {
        message: message.to_string(),
    }
}

#[test]
fn test_initial_state_is_loading_everything() {
    let state = ListingState::default();

    assert!(state.is_loading(&Language::all()));
    assert!(state.is_loading(&Language::new("Ruby")));
    assert!(state.error().is_none());
    assert!(state.languages().is_empty());
}

#[test]
fn test_success_records_results_in_provider_order() {
    let state = reduce(&ListingState::default(), success("Ruby", &["b", "a", "c"]));

    let names: Vec<_> = state
        .results(&Language::new("Ruby"))
        .unwrap()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["b", "a", "c"]);
    assert!(!state.is_loading(&Language::new("Ruby")));
}

#[test]
fn test_reduce_leaves_input_state_untouched() {
    let before = ListingState::default();
    let after = reduce(&before, success("All", &["r1"]));

    assert_eq!(before, ListingState::default());
    assert_ne!(before, after);
}

#[test]
fn test_error_keeps_cached_languages() {
    let state = reduce(&ListingState::default(), success("All", &["r1"]));
    let state = reduce(&state, success("Ruby", &["r2"]));
    let state = reduce(&state, error("rate limited"));

    assert_eq!(state.error(), Some("rate limited"));
    assert_eq!(state.results(&Language::all()).unwrap()[0].name, "r1");
    assert_eq!(state.results(&Language::new("Ruby")).unwrap()[0].name, "r2");
}

#[test]
fn test_error_stops_loading_for_unfetched_language() {
    let state = reduce(&ListingState::default(), error("offline"));

    // The error replaces the spinner for every language without results
    assert!(!state.is_loading(&Language::new("Python")));
    assert!(state.results(&Language::new("Python")).is_none());
}

#[test]
fn test_success_clears_previous_error() {
    let state = reduce(&ListingState::default(), error("offline"));
    let state = reduce(&state, success("CSS", &["bootstrap"]));

    assert!(state.error().is_none());
}

#[test]
fn test_success_for_same_language_replaces_results() {
    let state = reduce(&ListingState::default(), success("Java", &["old"]));
    let state = reduce(&state, success("Java", &["new"]));

    let repos = state.results(&Language::new("Java")).unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name, "new");
}

#[test]
fn test_interleaved_failures_never_drop_successes() {
    let languages = ["All", "JavaScript", "Ruby", "Java", "CSS", "Python"];
    let mut state = ListingState::default();

    for (i, language) in languages.iter().enumerate() {
        state = if i % 2 == 0 {
            reduce(&state, success(language, &[*language]))
        } else {
            reduce(&state, error(&format!("{language} failed")))
        };

        for earlier in languages[..=i].iter().step_by(2) {
            assert!(
                state.results(&Language::new(*earlier)).is_some(),
                "{earlier} lost after step {i}"
            );
        }
    }

    assert_eq!(state.languages().len(), 3);
}

#[test]
fn test_store_dispatch_notifies_subscribers() {
    let store = ListingStore::new();
    let mut receiver = store.subscribe();
    assert!(!receiver.has_changed().unwrap());

    store.dispatch(success("All", &["r1"]));

    assert!(receiver.has_changed().unwrap());
    let seen = receiver.borrow_and_update().clone();
    assert_eq!(seen, store.state());
    assert!(!store.is_loading(&Language::all()));
}

#[test]
fn test_json_languages_are_sorted() {
    let store = ListingStore::new();
    for language in ["Ruby", "CSS", "All", "Python"] {
        store.dispatch(success(language, &["r"]));
    }

    let json = serde_json::to_string(&store.state()).unwrap();
    let position = |key: &str| json.find(&format!("\"{key}\":")).unwrap();

    assert!(position("All") < position("CSS"));
    assert!(position("CSS") < position("Python"));
    assert!(position("Python") < position("Ruby"));
}
