//! Player scoring
//!
//! `score = followers * follower_weight + public_repos * repo_count_weight
//! + stars of the counted repositories`. The default counts every owned
//! repository's stars, three points per follower and nothing for the
//! repository count. All arithmetic saturates.

use crate::api::github::{Profile, Repository};
use serde::Serialize;
use std::cmp::Ordering;

/// Weights applied when scoring a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub follower_weight: u64,
    pub repo_count_weight: u64,
    /// Only the N most recently updated repositories count; `None` counts all
    pub recent_limit: Option<usize>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            follower_weight: 3,
            repo_count_weight: 0,
            recent_limit: None,
        }
    }
}

/// Most recently updated first; the remaining keys only make the order total
fn recency(a: &&Repository, b: &&Repository) -> Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
        .then_with(|| b.stargazers_count.cmp(&a.stargazers_count))
}

impl ScoringPolicy {
    /// Total stars of the repositories this policy counts
    pub fn counted_stars(&self, repos: &[Repository]) -> u64 {
        let counted: Vec<&Repository> = match self.recent_limit {
            None => repos.iter().collect(),
            Some(limit) => {
                let mut sorted: Vec<&Repository> = repos.iter().collect();
                sorted.sort_by(recency);
                sorted.truncate(limit);
                sorted
            }
        };

        counted
            .iter()
            .map(|repo| repo.stargazers_count)
            .fold(0, u64::saturating_add)
    }

    pub fn score(&self, profile: &Profile, repos: &[Repository]) -> u64 {
        profile
            .followers
            .saturating_mul(self.follower_weight)
            .saturating_add(profile.public_repos.saturating_mul(self.repo_count_weight))
            .saturating_add(self.counted_stars(repos))
    }
}

/// A fetched profile with its score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPlayer {
    pub profile: Profile,
    pub score: u64,
}

#[cfg(test)]
mod tests {
    include!("score.test.rs");
}
