//! Text rendering of listing and battle state
//!
//! Each renderer mirrors one screen: loading shows a status line, an error
//! shows its message, success shows the data.

use super::styling::StyleManager;
use super::table::TableDisplay;
use crate::api::github::Profile;
use crate::battle::{BattleResult, BattleState, ScoredPlayer};
use crate::popular::ListingState;
use crate::primitives::Language;

/// Ranked grid for one language, preceded by the last fetch error if any
pub fn render_listing(language: &Language, state: &ListingState, styling: &StyleManager) -> String {
    let mut sections = Vec::new();

    if state.is_loading(language) {
        sections.push(styling.format_working(&format!("Fetching {language} repos")));
    }
    if let Some(error) = state.error() {
        sections.push(styling.format_error(error));
    }

    if let Some(repos) = state.results(language) {
        let mut table = TableDisplay::new(styling).header(&[
            "#",
            "Repository",
            "Owner",
            "Stars",
            "Forks",
            "Issues",
        ]);
        for (rank, repo) in repos.iter().enumerate() {
            table = table.row(&[
                format!("#{}", rank + 1),
                repo.name.clone(),
                format!("@{}", repo.owner.login),
                repo.stargazers_count.to_string(),
                repo.forks.to_string(),
                repo.open_issues.to_string(),
            ]);
        }

        sections.push(styling.style_emphasis(&format!("Popular {language} repositories")));
        if repos.is_empty() {
            sections.push(styling.style_subtle("No repositories"));
        } else {
            sections.push(table.render());
        }
    }

    sections.join("\n")
}

/// Winner and loser cards, or the error, or the loading line
pub fn render_battle(state: &BattleState, styling: &StyleManager) -> String {
    match state {
        BattleState::Loading => styling.format_working("Battling"),
        BattleState::Error(message) => styling.format_error(message),
        BattleState::Success(result) => render_result(result, styling),
    }
}

fn render_result(result: &BattleResult, styling: &StyleManager) -> String {
    let (winner_label, loser_label) = if result.is_tie() {
        ("Tie", "Tie")
    } else {
        ("Winner", "Loser")
    };

    [
        render_card(winner_label, &result.winner, styling),
        render_card(loser_label, &result.loser, styling),
    ]
    .join("\n\n")
}

fn render_card(label: &str, player: &ScoredPlayer, styling: &StyleManager) -> String {
    let profile = &player.profile;
    let title = match label {
        "Winner" => styling.style_success(label),
        "Loser" => styling.style_error(label),
        _ => styling.style_warning(label),
    };

    let mut lines = vec![
        format!("{} {}", styling.style_emphasis(&title), profile.login),
        format!("Score: {}", styling.style_emphasis(&player.score.to_string())),
    ];
    lines.extend(profile_details(profile));
    lines.push(styling.style_subtle(&profile.html_url));

    lines.join("\n")
}

fn profile_details(profile: &Profile) -> Vec<String> {
    let mut details = Vec::new();
    if let Some(name) = &profile.name {
        details.push(format!("Name: {name}"));
    }
    if let Some(location) = &profile.location {
        details.push(format!("Location: {location}"));
    }
    if let Some(company) = &profile.company {
        details.push(format!("Company: {company}"));
    }
    details.push(format!("Followers: {}", profile.followers));
    details.push(format!("Following: {}", profile.following));
    details.push(format!("Public Repos: {}", profile.public_repos));
    details
}

#[cfg(test)]
mod tests {
    include!("render.test.rs");
}
