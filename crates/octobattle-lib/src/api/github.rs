//! GitHub API provider
//!
//! Provides production (Live) and test (Mock) implementations of the three
//! lookups the app needs: popular repositories per language, a user's
//! profile and a user's owned repositories.

use crate::networking::{NetworkingError, NetworkingManager};
use crate::primitives::{Language, Player};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, Notify};
use tracing::trace;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Owned repositories requested per user (GitHub's page maximum)
const REPOS_PER_PAGE: u32 = 100;

/// Path segment characters left as-is (logins may contain `-`)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// GitHub provider errors
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: NetworkingError,
    },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Provider error: {message}")]
    Provider { message: String },
}

impl GithubError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GithubError::NotFound { .. })
    }
}

/// Absent and `null` counters both read as zero
fn zero_if_null<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Repository owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// Repository as returned by search and user listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
    pub owner: Owner,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub forks: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub open_issues: u64,
    /// ISO-8601 timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// User profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub followers: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub following: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub public_repos: u64,
}

/// Search endpoint envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<Repository>,
}

/// Trait for the GitHub lookups
pub trait GithubProvider: Send + Sync {
    /// Most starred repositories for a language, in provider rank order
    fn fetch_popular_repos(
        &self,
        language: &Language,
    ) -> impl std::future::Future<Output = Result<Vec<Repository>, GithubError>> + Send;

    /// Profile for a login
    ///
    /// Fails with [`GithubError::NotFound`] when the login does not exist.
    fn fetch_profile(
        &self,
        player: &Player,
    ) -> impl std::future::Future<Output = Result<Profile, GithubError>> + Send;

    /// Repositories owned by a login
    fn fetch_repos(
        &self,
        player: &Player,
    ) -> impl std::future::Future<Output = Result<Vec<Repository>, GithubError>> + Send;
}

/// Live GitHub API client (production)
pub struct LiveGithubClient {
    networking: Arc<NetworkingManager>,
    base_url: String,
}

impl LiveGithubClient {
    /// Create new live client against api.github.com
    pub fn new(networking: Arc<NetworkingManager>) -> Self {
        Self::with_base_url(networking, DEFAULT_API_URL.to_string())
    }

    /// Create client with custom base URL (for GitHub Enterprise/testing)
    pub fn with_base_url(networking: Arc<NetworkingManager>, base_url: String) -> Self {
        Self {
            networking,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn popular_url(&self, language: &Language) -> String {
        format!(
            "{}/search/repositories?q={}&sort=stars&order=desc&type=Repositories",
            self.base_url,
            utf8_percent_encode(&language.search_qualifier(), NON_ALPHANUMERIC)
        )
    }

    fn user_url(&self, player: &Player) -> String {
        format!(
            "{}/users/{}",
            self.base_url,
            utf8_percent_encode(player.as_str(), PATH_SEGMENT)
        )
    }
}

/// Map a 404 onto the resource the caller asked for
fn not_found_as(resource: &str) -> impl FnOnce(NetworkingError) -> GithubError + '_ {
    move |err| match err {
        NetworkingError::NotFound { .. } => GithubError::NotFound {
            resource: resource.to_string(),
        },
        other => GithubError::Network { source: other },
    }
}

impl GithubProvider for LiveGithubClient {
    async fn fetch_popular_repos(&self, language: &Language) -> Result<Vec<Repository>, GithubError> {
        let url = self.popular_url(language);
        trace!("Fetching popular repositories: {}", url);

        let response: SearchResponse = self.networking.get_json(&url).await?;
        Ok(response.items)
    }

    async fn fetch_profile(&self, player: &Player) -> Result<Profile, GithubError> {
        let url = self.user_url(player);
        trace!("Fetching profile: {}", url);

        self.networking
            .get_json(&url)
            .await
            .map_err(not_found_as(player.as_str()))
    }

    async fn fetch_repos(&self, player: &Player) -> Result<Vec<Repository>, GithubError> {
        let url = format!("{}/repos?per_page={}", self.user_url(player), REPOS_PER_PAGE);
        trace!("Fetching owned repositories: {}", url);

        self.networking
            .get_json(&url)
            .await
            .map_err(not_found_as(player.as_str()))
    }
}

/// Mock GitHub provider (testing)
///
/// Unknown logins answer `NotFound`; unknown languages answer a provider error.
/// A gate registered for a key holds that lookup until the gate is notified.
#[derive(Clone, Default)]
pub struct MockGithubProvider {
    popular_responses: Arc<Mutex<HashMap<Language, Result<Vec<Repository>, String>>>>,
    profile_responses: Arc<Mutex<HashMap<String, Result<Profile, String>>>>,
    repo_responses: Arc<Mutex<HashMap<String, Result<Vec<Repository>, String>>>>,
    gates: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockGithubProvider {
    /// Create new mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add mock popular repositories response
    pub async fn with_popular(
        self,
        language: impl Into<Language>,
        result: Result<Vec<Repository>, String>,
    ) -> Self {
        self.popular_responses
            .lock()
            .await
            .insert(language.into(), result);
        self
    }

    /// Add mock profile response
    pub async fn with_profile(self, login: &str, result: Result<Profile, String>) -> Self {
        self.profile_responses
            .lock()
            .await
            .insert(login.to_string(), result);
        self
    }

    /// Add mock owned repositories response
    pub async fn with_repos(self, login: &str, result: Result<Vec<Repository>, String>) -> Self {
        self.repo_responses
            .lock()
            .await
            .insert(login.to_string(), result);
        self
    }

    /// Register a user with a profile and owned repositories in one go
    pub async fn with_user(self, profile: Profile, repos: Vec<Repository>) -> Self {
        let login = profile.login.clone();
        self.with_profile(&login, Ok(profile))
            .await
            .with_repos(&login, Ok(repos))
            .await
    }

    /// Hold lookups for `key` (`popular:{language}`, `profile:{login}`,
    /// `repos:{login}`) until `gate` is notified
    pub async fn with_gate(self, key: &str, gate: Arc<Notify>) -> Self {
        self.gates.lock().await.insert(key.to_string(), gate);
        self
    }

    /// Every lookup issued so far, as gate-style keys
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// Number of lookups issued for one key
    pub async fn call_count(&self, key: &str) -> usize {
        self.calls.lock().await.iter().filter(|c| *c == key).count()
    }

    async fn record(&self, key: String) {
        self.calls.lock().await.push(key.clone());

        let gate = self.gates.lock().await.get(&key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

impl GithubProvider for MockGithubProvider {
    async fn fetch_popular_repos(&self, language: &Language) -> Result<Vec<Repository>, GithubError> {
        self.record(format!("popular:{language}")).await;
        let responses = self.popular_responses.lock().await;

        match responses.get(language) {
            Some(Ok(repos)) => Ok(repos.clone()),
            Some(Err(err)) => Err(GithubError::Provider {
                message: err.clone(),
            }),
            None => Err(GithubError::Provider {
                message: format!("No mock response for language: {}", language),
            }),
        }
    }

    async fn fetch_profile(&self, player: &Player) -> Result<Profile, GithubError> {
        self.record(format!("profile:{player}")).await;
        let responses = self.profile_responses.lock().await;

        match responses.get(player.as_str()) {
            Some(Ok(profile)) => Ok(profile.clone()),
            Some(Err(err)) => Err(GithubError::Provider {
                message: err.clone(),
            }),
            None => Err(GithubError::NotFound {
                resource: player.to_string(),
            }),
        }
    }

    async fn fetch_repos(&self, player: &Player) -> Result<Vec<Repository>, GithubError> {
        self.record(format!("repos:{player}")).await;
        let responses = self.repo_responses.lock().await;

        match responses.get(player.as_str()) {
            Some(Ok(repos)) => Ok(repos.clone()),
            Some(Err(err)) => Err(GithubError::Provider {
                message: err.clone(),
            }),
            None => Err(GithubError::NotFound {
                resource: player.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("github.test.rs");
}
