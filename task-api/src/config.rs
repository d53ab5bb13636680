//! Client configuration with sensible defaults.
//!
//! [`ApiConfig`] controls where the task endpoints live, request timeouts
//! and authentication. It is embedded as the `[api]` table of the
//! edu-reminders TOML config.

use crate::error::TaskApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Configuration for [`TaskApiClient`](crate::TaskApiClient).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and authority of the platform, e.g. `https://school.example`.
    pub base_url: String,
    /// Path of the calendar task collection. Used for both the query and the
    /// reminder-sent mutation.
    pub tasks_path: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Optional bearer token sent in the `Authorization` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Custom User-Agent. Defaults to `task-api/<version>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_owned(),
            tasks_path: "/api/calendar/tasks".to_owned(),
            timeout_seconds: 10,
            auth_token: None,
            user_agent: None,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("tasks_path", &self.tasks_path)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ApiConfig {
    /// Create a config pointing at `base_url` with default settings otherwise.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` parses as an `http` or `https` URL
    /// - `tasks_path` starts with `/`
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), TaskApiError> {
        if self.base_url.trim().is_empty() {
            return Err(TaskApiError::Config("base_url must not be empty".into()));
        }
        let base = Url::parse(&self.base_url)
            .map_err(|e| TaskApiError::Config(format!("invalid base_url: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(TaskApiError::Config(format!(
                "base_url scheme must be http or https, got {}",
                base.scheme()
            )));
        }
        if !self.tasks_path.starts_with('/') {
            return Err(TaskApiError::Config("tasks_path must start with '/'".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(TaskApiError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Absolute URL of the task collection.
    pub fn tasks_url(&self) -> Result<Url, TaskApiError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| TaskApiError::Config(format!("invalid base_url: {e}")))?;
        base.join(&self.tasks_path)
            .map_err(|e| TaskApiError::Config(format!("invalid tasks_path: {e}")))
    }
}
