//! Two-player GitHub battles
//!
//! [`BattleResolver`] fetches and scores both players, [`BattleMachine`]
//! tracks the outcome of the current request and drops completions that
//! belong to a superseded one.

pub mod resolver;
pub mod score;
pub mod state;

pub use resolver::BattleResolver;
pub use score::{ScoredPlayer, ScoringPolicy};
pub use state::{
    BattleAction, BattleMachine, BattleSnapshot, BattleState, Completion, StartOutcome, reduce,
};

use crate::api::github::GithubError;
use crate::primitives::Player;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use thiserror::Error;

const PLAYER_ONE_KEY: &str = "playerOne";
const PLAYER_TWO_KEY: &str = "playerTwo";

/// Battle errors
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("{slot} is required")]
    EmptyPlayer { slot: &'static str },

    #[error("{player} doesn't exist")]
    UnknownPlayer { player: Player },

    #[error("There was an error fetching data for {player}: {source}")]
    FetchFailed {
        player: Player,
        #[source]
        source: GithubError,
    },

    #[error("Battle between {player_one} and {player_two} timed out after {seconds}s")]
    TimedOut {
        player_one: Player,
        player_two: Player,
        seconds: u64,
    },

    #[error("Invalid battle query: {reason}")]
    InvalidQuery { reason: String },
}

impl BattleError {
    /// Attribute a provider failure to the player it was fetched for
    pub fn for_player(player: &Player, source: GithubError) -> Self {
        if source.is_not_found() {
            BattleError::UnknownPlayer {
                player: player.clone(),
            }
        } else {
            BattleError::FetchFailed {
                player: player.clone(),
                source,
            }
        }
    }
}

/// Ordered pair of players; player one takes the winner slot on a tie
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BattleRequest {
    pub player_one: Player,
    pub player_two: Player,
}

impl BattleRequest {
    pub fn new(player_one: impl Into<Player>, player_two: impl Into<Player>) -> Self {
        Self {
            player_one: player_one.into(),
            player_two: player_two.into(),
        }
    }

    /// Parse `playerOne=..&playerTwo=..`, with or without a leading `?`
    pub fn from_query(query: &str) -> Result<Self, BattleError> {
        let mut player_one = None;
        let mut player_two = None;

        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = decode_component(value)?;
            match key {
                PLAYER_ONE_KEY => player_one = Some(value),
                PLAYER_TWO_KEY => player_two = Some(value),
                _ => {}
            }
        }

        match (player_one, player_two) {
            (Some(one), Some(two)) => Ok(Self::new(Player::new(one), Player::new(two))),
            (None, _) => Err(BattleError::InvalidQuery {
                reason: format!("missing {PLAYER_ONE_KEY}"),
            }),
            (_, None) => Err(BattleError::InvalidQuery {
                reason: format!("missing {PLAYER_TWO_KEY}"),
            }),
        }
    }

    /// Both logins must be non-empty
    pub fn validate(&self) -> Result<(), BattleError> {
        if self.player_one.is_empty() {
            return Err(BattleError::EmptyPlayer {
                slot: "Player One",
            });
        }
        if self.player_two.is_empty() {
            return Err(BattleError::EmptyPlayer {
                slot: "Player Two",
            });
        }
        Ok(())
    }
}

fn decode_component(value: &str) -> Result<String, BattleError> {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| BattleError::InvalidQuery {
            reason: e.to_string(),
        })
}

/// Winner and loser of a resolved battle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleResult {
    pub winner: ScoredPlayer,
    pub loser: ScoredPlayer,
}

impl BattleResult {
    /// Rank two scored players; on equal scores `first` keeps the winner slot
    pub fn rank(first: ScoredPlayer, second: ScoredPlayer) -> Self {
        if second.score > first.score {
            Self {
                winner: second,
                loser: first,
            }
        } else {
            Self {
                winner: first,
                loser: second,
            }
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winner.score == self.loser.score
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
