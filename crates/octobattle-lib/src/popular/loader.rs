//! At-most-once category fetching
//!
//! A language is recorded as requested before its fetch is awaited, so a
//! second request arriving while the first is still in flight is a cache
//! hit. A failed language stays recorded: re-selecting it shows the error
//! again instead of refetching for the rest of the session.

use super::store::{ListingStore, PopularAction};
use crate::api::github::GithubProvider;
use crate::primitives::Language;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

/// What a call to [`PopularLoader::request`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Fetch issued and its repositories stored
    Fetched { count: usize },
    /// Fetch issued and failed; the error is in the store
    Failed { message: String },
    /// Already requested this session, no fetch issued
    Cached,
    /// Blank language name; nothing recorded or fetched
    Rejected,
}

/// Owns the set of requested languages and the listing store
pub struct PopularLoader<P>
where
    P: GithubProvider,
{
    provider: Arc<P>,
    requested: Mutex<HashSet<Language>>,
    store: ListingStore,
}

impl<P> PopularLoader<P>
where
    P: GithubProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            requested: Mutex::new(HashSet::new()),
            store: ListingStore::new(),
        }
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    /// Whether `language` has been requested this session
    pub async fn has_requested(&self, language: &Language) -> bool {
        self.requested.lock().await.contains(language)
    }

    /// Languages requested so far, sorted
    pub async fn requested(&self) -> Vec<Language> {
        let mut languages: Vec<_> = self.requested.lock().await.iter().cloned().collect();
        languages.sort();
        languages
    }

    /// Fetch `language` unless it was already requested
    pub async fn request(&self, language: &Language) -> RequestOutcome {
        if language.is_empty() {
            warn!("Ignoring request for a blank language name");
            return RequestOutcome::Rejected;
        }

        // Guard dropped at the end of the statement, before the fetch suspends
        let first_request = self.requested.lock().await.insert(language.clone());
        if !first_request {
            debug!("{} already requested, skipping fetch", language);
            return RequestOutcome::Cached;
        }

        trace!("Requesting popular repositories for {}", language);

        match self.provider.fetch_popular_repos(language).await {
            Ok(repos) => {
                let count = repos.len();
                debug!("Fetched {} repositories for {}", count, language);
                self.store.dispatch(PopularAction::Success {
                    language: language.clone(),
                    repos,
                });
                RequestOutcome::Fetched { count }
            }
            Err(e) => {
                let message = format!("There was an error fetching the {language} repositories: {e}");
                warn!("{} (not refetched this session)", message);
                self.store.dispatch(PopularAction::Error {
                    message: message.clone(),
                });
                RequestOutcome::Failed { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
