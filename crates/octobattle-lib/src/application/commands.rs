//! Command execution handlers
//!
//! Every handler runs against a [`CommandSession`] and returns the rendered
//! result; only [`execute_command`] writes to stdout.

use crate::api::github::GithubProvider;
use crate::application::session::CommandSession;
use crate::application::{CliConfig, Commands};
use crate::battle::BattleRequest;
use crate::display::{render_battle, render_listing};
use crate::primitives::{Language, OutputFormat, Player};
use crate::progress_span;
use anyhow::{Context, Result};
use serde_json::json;
use tracing::{Instrument, info};

/// Execute CLI commands against the live GitHub API
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let Some(command) = config.command else {
        println!("octobattle - popular GitHub repositories and player battles");
        println!("Run 'octobattle --help' for usage information");
        return Ok(());
    };

    let session =
        CommandSession::live(config.app_config).context("Failed to create GitHub client")?;

    let output = execute_command_with_session(command, &session).await?;
    println!("{output}");
    Ok(())
}

/// Execute a specific command with a provided session (for testing)
pub async fn execute_command_with_session<P>(
    command: Commands,
    session: &CommandSession<P>,
) -> Result<String>
where
    P: GithubProvider,
{
    match command {
        Commands::Popular { languages } => handle_popular(session, languages).await,
        Commands::Battle {
            player_one,
            player_two,
            query,
        } => handle_battle(session, player_one, player_two, query).await,
        Commands::Languages => handle_languages(session),
        Commands::Version => Ok(handle_version(session)),
    }
}

async fn handle_popular<P>(session: &CommandSession<P>, languages: Vec<String>) -> Result<String>
where
    P: GithubProvider,
{
    let languages: Vec<Language> = if languages.is_empty() {
        vec![Language::all()]
    } else {
        languages.into_iter().map(Language::new).collect()
    };
    if languages.iter().any(Language::is_empty) {
        return Err(anyhow::anyhow!("Language name is required"));
    }

    let loader = session.loader();
    let mut sections = Vec::with_capacity(languages.len());

    for language in &languages {
        let outcome = loader
            .request(language)
            .instrument(progress_span!(format!("Fetching {language} repos")))
            .await;
        info!(language = %language, outcome = ?outcome, "Popular repositories requested");

        // The store's error is global, so render each language as soon as it settles
        sections.push(render_listing(
            language,
            &loader.store().state(),
            session.styling(),
        ));
    }

    match session.config().output {
        OutputFormat::Text => Ok(sections.join("\n\n")),
        OutputFormat::Json => serde_json::to_string_pretty(&loader.store().state())
            .context("Failed to serialize listing state"),
    }
}

async fn handle_battle<P>(
    session: &CommandSession<P>,
    player_one: Option<String>,
    player_two: Option<String>,
    query: Option<String>,
) -> Result<String>
where
    P: GithubProvider,
{
    let request = match query {
        Some(query) => BattleRequest::from_query(&query).context("Invalid battle request")?,
        None => BattleRequest::new(
            Player::new(player_one.unwrap_or_default()),
            Player::new(player_two.unwrap_or_default()),
        ),
    };

    let completion = session
        .machine()
        .run(session.resolver(), &request)
        .instrument(progress_span!("Battling"))
        .await;
    info!(
        player_one = %request.player_one,
        player_two = %request.player_two,
        completion = ?completion,
        "Battle finished"
    );

    match session.config().output {
        OutputFormat::Text => Ok(render_battle(
            &session.machine().current(),
            session.styling(),
        )),
        OutputFormat::Json => serde_json::to_string_pretty(&session.machine().snapshot())
            .context("Failed to serialize battle state"),
    }
}

fn handle_languages<P>(session: &CommandSession<P>) -> Result<String>
where
    P: GithubProvider,
{
    let languages = Language::defaults();

    match session.config().output {
        OutputFormat::Text => Ok(languages
            .iter()
            .map(|language| format!("• {language}"))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&languages).context("Failed to serialize languages")
        }
    }
}

fn handle_version<P>(session: &CommandSession<P>) -> String
where
    P: GithubProvider,
{
    let version = env!("CARGO_PKG_VERSION");

    match session.config().output {
        OutputFormat::Text => format!(
            "{} {}",
            session.styling().style_emphasis("octobattle"),
            version
        ),
        OutputFormat::Json => json!({ "name": "octobattle", "version": version }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
