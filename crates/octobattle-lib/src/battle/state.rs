//! Battle state machine
//!
//! `Loading -> Success | Error`, restarted by every new request. The
//! machine remembers which request is current and drops completions for
//! any other one, so a slow battle can never overwrite a newer result.

use super::resolver::BattleResolver;
use super::{BattleRequest, BattleResult};
use crate::api::github::GithubProvider;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum BattleState {
    Loading,
    Success(BattleResult),
    Error(String),
}

impl BattleState {
    pub fn is_loading(&self) -> bool {
        matches!(self, BattleState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BattleAction {
    Start,
    Resolved(BattleResult),
    Failed(String),
}

/// Apply one action, returning the next state
pub fn reduce(_state: &BattleState, action: BattleAction) -> BattleState {
    match action {
        BattleAction::Start => BattleState::Loading,
        BattleAction::Resolved(result) => BattleState::Success(result),
        BattleAction::Failed(message) => BattleState::Error(message),
    }
}

/// The current request together with its state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleSnapshot {
    pub request: Option<BattleRequest>,
    pub state: BattleState,
}

/// Result of [`BattleMachine::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// New request, state reset to Loading
    Started,
    /// Same pair as the current request, nothing changed
    AlreadyCurrent,
}

/// Result of delivering a completion to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Completion belonged to the current request and was applied
    Applied,
    /// Completion belonged to a superseded request and was dropped
    Stale,
    /// The request was already current; nothing was resolved
    Unchanged,
}

#[derive(Debug)]
pub struct BattleMachine {
    sender: watch::Sender<BattleSnapshot>,
}

impl BattleMachine {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(BattleSnapshot {
            request: None,
            state: BattleState::Loading,
        });
        Self { sender }
    }

    /// Current state snapshot
    pub fn current(&self) -> BattleState {
        self.sender.borrow().state.clone()
    }

    /// Request whose completion the machine is waiting for or showing
    pub fn request(&self) -> Option<BattleRequest> {
        self.sender.borrow().request.clone()
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BattleSnapshot> {
        self.sender.subscribe()
    }

    /// Make `request` current and reset to Loading, unless it already is current
    pub fn start(&self, request: &BattleRequest) -> StartOutcome {
        let started = self.sender.send_if_modified(|snapshot| {
            if snapshot.request.as_ref() == Some(request) {
                return false;
            }
            snapshot.request = Some(request.clone());
            snapshot.state = reduce(&snapshot.state, BattleAction::Start);
            true
        });

        if started {
            trace!("Battle {} vs {} started", request.player_one, request.player_two);
            StartOutcome::Started
        } else {
            debug!(
                "Battle {} vs {} is already current",
                request.player_one, request.player_two
            );
            StartOutcome::AlreadyCurrent
        }
    }

    pub fn on_resolved(&self, request: &BattleRequest, result: BattleResult) -> Completion {
        self.complete(request, BattleAction::Resolved(result))
    }

    pub fn on_failed(&self, request: &BattleRequest, message: impl Into<String>) -> Completion {
        self.complete(request, BattleAction::Failed(message.into()))
    }

    /// Start `request` and resolve it, applying the outcome if still current
    pub async fn run<P>(&self, resolver: &BattleResolver<P>, request: &BattleRequest) -> Completion
    where
        P: GithubProvider,
    {
        if self.start(request) == StartOutcome::AlreadyCurrent {
            return Completion::Unchanged;
        }

        match resolver.resolve(request).await {
            Ok(result) => self.on_resolved(request, result),
            Err(e) => self.on_failed(request, e.to_string()),
        }
    }

    /// Loading is the only state a completion may leave
    fn complete(&self, request: &BattleRequest, action: BattleAction) -> Completion {
        let applied = self.sender.send_if_modified(|snapshot| {
            if snapshot.request.as_ref() != Some(request) || !snapshot.state.is_loading() {
                return false;
            }
            snapshot.state = reduce(&snapshot.state, action);
            true
        });

        if applied {
            Completion::Applied
        } else {
            debug!(
                "Dropping stale completion for {} vs {}",
                request.player_one, request.player_two
            );
            Completion::Stale
        }
    }
}

impl Default for BattleMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("state.test.rs");
}
