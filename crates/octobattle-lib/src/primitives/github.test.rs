use super::*;

#[test]
fn test_default_languages_start_with_all() {
    let languages = Language::defaults();

    assert_eq!(languages.len(), DEFAULT_LANGUAGES.len());
    assert_eq!(languages[0], Language::all());
    assert!(languages[0].is_all());
    assert!(languages[1..].iter().all(|l| !l.is_all()));
}

#[test]
fn test_search_qualifier() {
    assert_eq!(Language::all().search_qualifier(), "stars:>1");
    assert_eq!(
        Language::new("Ruby").search_qualifier(),
        "stars:>1 language:Ruby"
    );
}

#[test]
fn test_language_keys_are_exact() {
    assert_ne!(Language::new("ruby"), Language::new("Ruby"));
    assert!(!Language::new("all").is_all());
}

#[test]
fn test_language_trims_whitespace() {
    assert_eq!(Language::new(" Ruby\t"), Language::new("Ruby"));
    assert!(Language::new("").is_empty());
    assert!(Language::new("   ").is_empty());
    assert!(!Language::all().is_empty());
}

#[test]
fn test_player_trims_whitespace() {
    let player = Player::new("  sdras \n");
    assert_eq!(player.as_str(), "sdras");
    assert!(!player.is_empty());
    assert!(Player::new("   ").is_empty());
}

#[test]
fn test_identifiers_serialize_as_plain_strings() {
    assert_eq!(
        serde_json::to_string(&Language::new("CSS")).unwrap(),
        "\"CSS\""
    );
    assert_eq!(
        serde_json::to_string(&Player::new("tylermcginnis")).unwrap(),
        "\"tylermcginnis\""
    );
}
