use crate::primitives::*;
use indicatif::ProgressStyle;
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Set once the subscriber is installed
static INSTALLED: OnceLock<()> = OnceLock::new();

/// Spinner line for pending spans; `span_fields` carries the operation text
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {span_fields}";

/// Target of `progress_span!` spans, kept at `info` whatever the log level
pub const PROGRESS_TARGET: &str = "octobattle::progress";

/// Crates whose chatter is capped at `warn` unless RUST_LOG says otherwise
const QUIET_CRATES: &[&str] = &["hyper_util", "reqwest", "h2", "tokio", "mio", "want"];

/// Logger implementation using tracing with indicatif spinner integration
#[derive(Debug)]
pub struct Logger;

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<(), LoggerError> {
        if INSTALLED.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        // Spans created with `progress_span!` render as spinners through this layer
        let spinner_style = ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let indicatif_layer = IndicatifLayer::new().with_progress_style(spinner_style);

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directives(config.level)));

        let fmt_layer = match (config.output, config.format) {
            (LogOutput::Stderr, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(config.color)
                .compact()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Pretty) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(config.color)
                .pretty()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(config.color)
                .compact()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Pretty) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(config.color)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        INSTALLED
            .set(())
            .map_err(|_| LoggerError::AlreadyInitialized)?;

        tracing::info!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            color = config.color,
            "Logger initialized"
        );

        Ok(())
    }
}

/// Build the default `EnvFilter` directives: octobattle at `level`, noisy deps at warn
///
/// Spinner spans stay enabled at every level so pending work is always shown.
pub fn filter_directives(level: LogLevel) -> String {
    let level_str = level.as_filter();
    let mut directives = vec![
        format!("octobattle={level_str}"),
        format!("{PROGRESS_TARGET}=info"),
    ];
    directives.extend(QUIET_CRATES.iter().map(|name| format!("{name}=warn")));
    directives.push(level_str.to_string());
    directives.join(",")
}

/// Create a span that renders as a spinner while an operation is pending
#[macro_export]
macro_rules! progress_span {
    ($operation:expr) => {
        tracing::info_span!(
            target: $crate::logger::PROGRESS_TARGET,
            "progress",
            operation = %$operation
        )
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
