//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::api::github::DEFAULT_API_URL;
use crate::battle::ScoringPolicy;
use crate::networking::NetworkingConfig;
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::time::Duration;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const NET_TIMEOUT: &str = "30";
    pub const MAX_JOBS: &str = "4";
    pub const BATTLE_TIMEOUT: &str = "0";
    pub const COLOR: &str = "auto";
    pub const OUTPUT: &str = "text";
    pub const SCORE_RECENT_REPOS: &str = "0";
    pub const SCORE_REPO_WEIGHT: &str = "0";
}

/// Default value functions for configuration fields
mod default_fns {
    use crate::api::github::DEFAULT_API_URL;
    use crate::primitives::{ColorIntent, LogFormat, LogOutput, OutputFormat};

    pub fn api_url() -> String {
        DEFAULT_API_URL.to_string()
    }

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn net_timeout() -> u64 {
        30
    }

    pub fn max_jobs() -> u32 {
        4
    }

    pub fn battle_timeout() -> u64 {
        0
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn output() -> OutputFormat {
        OutputFormat::Text
    }

    pub fn score_recent_repos() -> usize {
        0
    }

    pub fn score_repo_weight() -> u64 {
        0
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// GitHub API base URL
    #[arg(long, env = "OCTOBATTLE_API_URL", default_value = DEFAULT_API_URL)]
    #[serde(default = "default_fns::api_url")]
    pub api_url: String,

    /// GitHub token, raises the API rate limit
    #[arg(long, env = "OCTOBATTLE_GITHUB_TOKEN", hide_env_values = true)]
    #[serde(default)]
    pub github_token: Option<String>,

    /// API timeout in seconds
    #[arg(short, long, env = "OCTOBATTLE_NET_TIMEOUT", default_value = defaults::NET_TIMEOUT)]
    #[serde(default = "default_fns::net_timeout")]
    pub net_timeout: u64,

    /// Number of concurrent API requests
    #[arg(short = 'j', long, env = "OCTOBATTLE_MAX_JOBS", default_value = defaults::MAX_JOBS)]
    #[serde(default = "default_fns::max_jobs")]
    pub max_jobs: u32,

    /// Battle timeout in seconds (0 waits indefinitely)
    #[arg(long, env = "OCTOBATTLE_BATTLE_TIMEOUT", default_value = defaults::BATTLE_TIMEOUT)]
    #[serde(default = "default_fns::battle_timeout")]
    pub battle_timeout: u64,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "OCTOBATTLE_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, env = "OCTOBATTLE_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "OCTOBATTLE_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "OCTOBATTLE_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Result format (text, json)
    #[arg(short, long, env = "OCTOBATTLE_OUTPUT", default_value = defaults::OUTPUT)]
    #[serde(default = "default_fns::output")]
    pub output: OutputFormat,

    /// Score only the N most recently updated repositories (0 = all)
    #[arg(long, env = "OCTOBATTLE_SCORE_RECENT_REPOS", default_value = defaults::SCORE_RECENT_REPOS)]
    #[serde(default = "default_fns::score_recent_repos")]
    pub score_recent_repos: usize,

    /// Points per public repository
    #[arg(long, env = "OCTOBATTLE_SCORE_REPO_WEIGHT", default_value = defaults::SCORE_REPO_WEIGHT)]
    #[serde(default = "default_fns::score_repo_weight")]
    pub score_repo_weight: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_fns::api_url(),
            github_token: None,
            net_timeout: default_fns::net_timeout(),
            max_jobs: default_fns::max_jobs(),
            battle_timeout: default_fns::battle_timeout(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            output: default_fns::output(),
            score_recent_repos: default_fns::score_recent_repos(),
            score_repo_weight: default_fns::score_repo_weight(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig, resolving color intent against the terminal
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color.resolve(),
        }
    }

    pub fn to_networking_config(&self) -> NetworkingConfig {
        NetworkingConfig {
            max_jobs: self.max_jobs,
            timeout_seconds: self.net_timeout,
            token: self.github_token.clone(),
            trace_requests: self.log_level >= LogLevel::Trace as u8,
        }
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            repo_count_weight: self.score_repo_weight,
            recent_limit: (self.score_recent_repos > 0).then_some(self.score_recent_repos),
            ..ScoringPolicy::default()
        }
    }

    /// `None` when battles wait indefinitely
    pub fn battle_timeout(&self) -> Option<Duration> {
        (self.battle_timeout > 0).then(|| Duration::from_secs(self.battle_timeout))
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.github_token.is_some() {
            self.github_token = other.github_token;
        }

        // For primitive fields, take other if it's not the default
        if other.api_url != default_fns::api_url() {
            self.api_url = other.api_url;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if other.net_timeout != default_fns::net_timeout() {
            self.net_timeout = other.net_timeout;
        }
        if other.max_jobs != default_fns::max_jobs() {
            self.max_jobs = other.max_jobs;
        }
        if other.battle_timeout != default_fns::battle_timeout() {
            self.battle_timeout = other.battle_timeout;
        }
        if other.score_recent_repos != default_fns::score_recent_repos() {
            self.score_recent_repos = other.score_recent_repos;
        }
        if other.score_repo_weight != default_fns::score_repo_weight() {
            self.score_repo_weight = other.score_repo_weight;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }
        if !matches!(other.output, OutputFormat::Text) {
            self.output = other.output;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.net_timeout == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "net_timeout must be greater than 0".to_string(),
            });
        }
        if self.max_jobs == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "max_jobs must be greater than 0".to_string(),
            });
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed {
                reason: format!("api_url must be an http(s) URL, got '{}'", self.api_url),
            });
        }
        if self.log_level > LogLevel::Trace as u8 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("log_level must be between 0 and 4, got {}", self.log_level),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
