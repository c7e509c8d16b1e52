use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// octobattle CLI - popular GitHub repositories and player battles
#[derive(Debug, Clone, Parser)]
#[command(name = "octobattle")]
#[command(about = "Browse popular GitHub repositories and battle two GitHub users")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// octobattle commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available octobattle commands
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Show the most starred repositories per language
    Popular {
        /// Languages to list; repeats are served from the session cache
        #[arg(help = "Languages to list (default: All)")]
        languages: Vec<String>,
    },

    /// Battle two GitHub users
    Battle {
        /// First player's login
        #[arg(required_unless_present = "query")]
        player_one: Option<String>,

        /// Second player's login
        #[arg(required_unless_present = "query")]
        player_two: Option<String>,

        /// Players as a results query string
        #[arg(
            long,
            conflicts_with_all = ["player_one", "player_two"],
            help = "Query string such as 'playerOne=sdras&playerTwo=tylermcginnis'"
        )]
        query: Option<String>,
    },

    /// List the languages offered by default
    Languages,

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
