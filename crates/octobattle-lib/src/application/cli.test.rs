use super::*;
use crate::primitives::{ColorIntent, OutputFormat};

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_parse_popular_languages() {
    let cli = Cli::try_parse_from(["octobattle", "popular", "Ruby", "Python"]).unwrap();

    assert_eq!(
        cli.command,
        Some(Commands::Popular {
            languages: vec!["Ruby".to_string(), "Python".to_string()],
        })
    );
}

#[test]
fn test_parse_battle_positional() {
    let cli = Cli::try_parse_from(["octobattle", "battle", "sdras", "tylermcginnis"]).unwrap();

    assert_eq!(
        cli.command,
        Some(Commands::Battle {
            player_one: Some("sdras".to_string()),
            player_two: Some("tylermcginnis".to_string()),
            query: None,
        })
    );
}

#[test]
fn test_parse_battle_query() {
    let cli = Cli::try_parse_from([
        "octobattle",
        "battle",
        "--query",
        "playerOne=a&playerTwo=b",
    ])
    .unwrap();

    let Some(Commands::Battle { query, .. }) = cli.command else {
        panic!("expected battle command");
    };
    assert_eq!(query.as_deref(), Some("playerOne=a&playerTwo=b"));
}

#[test]
fn test_battle_requires_players_or_query() {
    assert!(Cli::try_parse_from(["octobattle", "battle"]).is_err());
    assert!(Cli::try_parse_from(["octobattle", "battle", "only-one"]).is_err());
}

#[test]
fn test_global_flags() {
    let cli = Cli::try_parse_from([
        "octobattle",
        "--color",
        "never",
        "--output",
        "json",
        "--max-jobs",
        "8",
        "languages",
    ])
    .unwrap();

    assert_eq!(cli.config.color, ColorIntent::Never);
    assert_eq!(cli.config.output, OutputFormat::Json);
    assert_eq!(cli.config.max_jobs, 8);
    assert_eq!(cli.command, Some(Commands::Languages));
}
