//! Configuration loading
//!
//! Coordinates loading configuration from `.env` files, the environment and
//! the command line.

use crate::primitives::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{
    cli::{Cli, CliConfig},
    config::AppConfig,
    env::EnvironmentConfig,
};
use clap::Parser;

/// Files read from the working directory, earlier files win
pub const ENV_FILES: &[&str] = &[".env.local", ".env"];

/// Load `.env.local` then `.env` from `dir` into the process environment
///
/// Missing files are skipped; variables already set are never overwritten.
/// Returns the files that were read.
pub fn load_env_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut loaded = Vec::new();

    for env_file in ENV_FILES {
        let path = dir.join(env_file);
        match dotenvy::from_path(&path) {
            Ok(()) => {
                debug!("Loaded environment file {}", path.display());
                loaded.push(path);
            }
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: path.display().to_string(),
                    source: e,
                });
            }
        }
    }

    Ok(loaded)
}

impl AppConfig {
    /// Layer CLI values over defaults adjusted by the environment, then validate
    pub fn resolve(cli: AppConfig, env: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env.apply_color_config(config.color);

        let config = config.merge_with(cli);
        config.validate()?;

        Ok(config)
    }
}

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load_resolved() -> Result<Self, ConfigError> {
        // .env values must be in the process environment before clap reads `env =` attributes
        let cwd = std::env::current_dir().map_err(|e| ConfigError::ValidationFailed {
            reason: format!("cannot read working directory: {e}"),
        })?;
        load_env_files(&cwd)?;

        let env_config = EnvironmentConfig::load()?;
        let cli = Self::from_cli(Cli::parse());

        Ok(Self {
            app_config: AppConfig::resolve(cli.app_config, &env_config)?,
            command: cli.command,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
