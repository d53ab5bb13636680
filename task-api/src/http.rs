//! Shared HTTP client construction.

use crate::config::ApiConfig;
use crate::error::TaskApiError;
use std::time::Duration;

/// Default User-Agent when none is configured.
const DEFAULT_USER_AGENT: &str = concat!("task-api/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for the task API.
///
/// # Errors
///
/// Returns [`TaskApiError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ApiConfig) -> Result<reqwest::Client, TaskApiError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| TaskApiError::Http(format!("failed to build HTTP client: {e}")))
}

/// Shorten a response body for inclusion in an error message.
pub(crate) fn excerpt(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_CHARS {
        return trimmed.to_owned();
    }
    let mut out: String = trimmed.chars().take(MAX_CHARS).collect();
    out.push('…');
    out
}
