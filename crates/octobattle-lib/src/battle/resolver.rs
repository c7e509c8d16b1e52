//! Battle resolution
//!
//! Each player's profile and owned repositories are fetched together and
//! both players run side by side. The first failure ends the battle; no
//! result is produced for the other side.

use super::score::{ScoredPlayer, ScoringPolicy};
use super::{BattleError, BattleRequest, BattleResult};
use crate::api::github::GithubProvider;
use crate::primitives::Player;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

pub struct BattleResolver<P>
where
    P: GithubProvider,
{
    provider: Arc<P>,
    policy: ScoringPolicy,
    timeout: Option<Duration>,
}

impl<P> BattleResolver<P>
where
    P: GithubProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            policy: ScoringPolicy::default(),
            timeout: None,
        }
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound the whole battle; `None` waits indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Fetch, score and rank both players
    pub async fn resolve(&self, request: &BattleRequest) -> Result<BattleResult, BattleError> {
        request.validate()?;
        trace!(
            "Resolving battle {} vs {}",
            request.player_one, request.player_two
        );

        let battle = async {
            tokio::try_join!(
                self.score_player(&request.player_one),
                self.score_player(&request.player_two)
            )
        };

        let (one, two) = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, battle).await.map_err(|_| {
                BattleError::TimedOut {
                    player_one: request.player_one.clone(),
                    player_two: request.player_two.clone(),
                    seconds: limit.as_secs(),
                }
            })??,
            None => battle.await?,
        };

        debug!(
            "Scored {} = {}, {} = {}",
            one.profile.login, one.score, two.profile.login, two.score
        );
        Ok(BattleResult::rank(one, two))
    }

    async fn score_player(&self, player: &Player) -> Result<ScoredPlayer, BattleError> {
        let (profile, repos) = tokio::try_join!(
            self.provider.fetch_profile(player),
            self.provider.fetch_repos(player)
        )
        .map_err(|e| BattleError::for_player(player, e))?;

        let score = self.policy.score(&profile, &repos);
        Ok(ScoredPlayer { profile, score })
    }
}

#[cfg(test)]
mod tests {
    include!("resolver.test.rs");
}
