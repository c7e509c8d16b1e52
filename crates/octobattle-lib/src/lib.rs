//! # octobattle Library
//!
//! Popular GitHub repositories by language, and two-player GitHub battles.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, identifiers and errors
//! - [`logger`] - Structured logging with spinner rendering of pending work
//! - [`networking`] - Async HTTP client with concurrency management
//! - [`api`] - GitHub provider trait with live and mock implementations
//! - [`popular`] - At-most-once per-language loading into an observable store
//! - [`battle`] - Player scoring, battle resolution and the battle state machine
//! - [`display`] - Text rendering of listings and battle results
//! - [`application`] - CLI interface, configuration and command execution
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! // Initialize and run octobattle
//! octobattle_lib::main().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod battle;
pub mod display;
pub mod logger;
pub mod networking;
pub mod popular;
pub mod primitives;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types for convenience
pub use api::{GithubProvider, LiveGithubClient, MockGithubProvider};
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use battle::{BattleMachine, BattleRequest, BattleResolver, BattleResult, BattleState};
pub use logger::Logger;
pub use networking::{NetworkingConfig, NetworkingManager};
pub use popular::{ListingState, ListingStore, PopularLoader};
pub use primitives::{
    ColorIntent, ConfigError, Language, LogFormat, LogLevel, LogOutput, LoggerError, OutputFormat,
    Player,
};

// Private imports for the main function
use anyhow::{Context, Result};
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load configuration: defaults -> .env -> env vars -> CLI
    let config = CliConfig::load_resolved()?;

    Logger::init(config.app_config.to_logger_config()).context("Failed to initialize logger")?;

    // Execute the command
    execute_command(config).await
}
