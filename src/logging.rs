//! Tracing subscriber setup.
//!
//! Diagnostics always go to stderr so stdout stays free for the host's JSON
//! output. A daily rolling log file is added when a directory is configured.

use crate::config::LoggingConfig;
use crate::error::{ReminderError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// File name prefix of rolling log files.
pub const LOG_FILE_PREFIX: &str = "edu-reminders.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; hold it for the life
/// of the process.
///
/// # Errors
///
/// Fails when the filter directives are invalid, the log directory cannot be
/// created, or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.filter)?,
    };

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ReminderError::Config(format!("failed to install logger: {e}")))?;

    Ok(guard)
}

/// Parse `EnvFilter` directives such as `"edu_reminders=debug,info"`.
///
/// # Errors
///
/// Returns [`ReminderError::Config`] for malformed directives.
pub fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| ReminderError::Config(format!("invalid log filter {directives:?}: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(parse_filter(&LoggingConfig::default().filter).is_ok());
    }

    #[test]
    fn malformed_filter_is_config_error() {
        let err = parse_filter("edu_reminders=loud").unwrap_err();
        assert!(matches!(err, ReminderError::Config(_)));
    }
}
