//! Listing state and its reducer
//!
//! The state maps each successfully fetched language to its repositories
//! in provider order, plus the last fetch error. Entries are only ever
//! added or replaced; an error never evicts them.

use crate::api::github::Repository;
use crate::primitives::Language;
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::watch;

/// Snapshot of everything fetched so far
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingState {
    results: BTreeMap<Language, Vec<Repository>>,
    error: Option<String>,
}

impl ListingState {
    /// Repositories for a language, if its fetch has succeeded
    pub fn results(&self, language: &Language) -> Option<&[Repository]> {
        self.results.get(language).map(Vec::as_slice)
    }

    /// Last fetch error, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Nothing to show yet for `language`: no results and no error
    pub fn is_loading(&self, language: &Language) -> bool {
        !self.results.contains_key(language) && self.error.is_none()
    }

    /// Languages with results, sorted
    pub fn languages(&self) -> Vec<&Language> {
        self.results.keys().collect()
    }
}

/// Completions the loader feeds into the store
#[derive(Debug, Clone, PartialEq)]
pub enum PopularAction {
    Success {
        language: Language,
        repos: Vec<Repository>,
    },
    Error {
        message: String,
    },
}

/// Apply one action, returning the next state
pub fn reduce(state: &ListingState, action: PopularAction) -> ListingState {
    let mut next = state.clone();
    match action {
        PopularAction::Success { language, repos } => {
            next.results.insert(language, repos);
            next.error = None;
        }
        PopularAction::Error { message } => {
            next.error = Some(message);
        }
    }
    next
}

/// Observable holder of the current [`ListingState`]
#[derive(Debug)]
pub struct ListingStore {
    sender: watch::Sender<ListingState>,
}

impl ListingStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(ListingState::default());
        Self { sender }
    }

    /// Current state snapshot
    pub fn state(&self) -> ListingState {
        self.sender.borrow().clone()
    }

    /// Receiver that observes every dispatched action's result
    pub fn subscribe(&self) -> watch::Receiver<ListingState> {
        self.sender.subscribe()
    }

    pub fn is_loading(&self, language: &Language) -> bool {
        self.sender.borrow().is_loading(language)
    }

    /// Only the loader writes to the store
    pub(crate) fn dispatch(&self, action: PopularAction) {
        self.sender.send_modify(|state| *state = reduce(state, action));
    }
}

impl Default for ListingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("store.test.rs");
}
