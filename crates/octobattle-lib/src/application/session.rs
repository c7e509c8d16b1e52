//! Command session
//!
//! Each command execution creates a session that owns the loader, the
//! resolver and the battle state machine for its lifetime, built around
//! one shared GitHub provider.

use crate::api::github::{GithubProvider, LiveGithubClient};
use crate::application::config::AppConfig;
use crate::battle::{BattleMachine, BattleResolver};
use crate::display::StyleManager;
use crate::networking::{NetworkingError, NetworkingManager};
use crate::popular::PopularLoader;
use std::sync::Arc;

pub struct CommandSession<P>
where
    P: GithubProvider,
{
    config: AppConfig,
    styling: StyleManager,
    loader: PopularLoader<P>,
    resolver: BattleResolver<P>,
    machine: BattleMachine,
}

impl CommandSession<LiveGithubClient> {
    /// Session backed by the GitHub API at `config.api_url`
    pub fn live(config: AppConfig) -> Result<Self, NetworkingError> {
        let networking = Arc::new(NetworkingManager::new(config.to_networking_config())?);
        let client = LiveGithubClient::with_base_url(networking, config.api_url.clone());
        Ok(Self::new(config, Arc::new(client)))
    }
}

impl<P> CommandSession<P>
where
    P: GithubProvider,
{
    pub fn new(config: AppConfig, provider: Arc<P>) -> Self {
        let styling = StyleManager::new(config.color.resolve());
        let resolver = BattleResolver::new(provider.clone())
            .with_policy(config.scoring_policy())
            .with_timeout(config.battle_timeout());

        Self {
            styling,
            loader: PopularLoader::new(provider),
            resolver,
            machine: BattleMachine::new(),
            config,
        }
    }

    /// Replace the styling, e.g. to force plain output
    pub fn with_styling(mut self, styling: StyleManager) -> Self {
        self.styling = styling;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn styling(&self) -> &StyleManager {
        &self.styling
    }

    pub fn loader(&self) -> &PopularLoader<P> {
        &self.loader
    }

    pub fn resolver(&self) -> &BattleResolver<P> {
        &self.resolver
    }

    pub fn machine(&self) -> &BattleMachine {
        &self.machine
    }
}
