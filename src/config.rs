//! Configuration for the reminder scheduler.
//!
//! Loaded from TOML; every section falls back to defaults for missing
//! fields so a partial file is always valid input.

use crate::clock::LocalZone;
use crate::error::{ReminderError, Result};
use crate::notify::dispatcher::ToastStyle;
use crate::notify::evaluator::EvaluatorSettings;
use crate::notify::history::DEFAULT_HISTORY_LIMIT;
use crate::scheduler::UserSession;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use task_api::ApiConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Calendar task API settings.
    pub api: ApiConfig,
    /// Polling cadence and load window.
    pub schedule: ScheduleConfig,
    /// Notification windows and toast styling.
    pub notifications: NotificationConfig,
    /// User to activate at startup (host binary only).
    pub session: SessionConfig,
    /// Log filter and optional log directory.
    pub logging: LoggingConfig,
}

/// Polling cadence and load window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Seconds between evaluations of the cached task list.
    pub evaluation_interval_secs: u64,
    /// Seconds between refetches of the task list.
    pub refresh_interval_secs: u64,
    /// Days after today included in each load.
    pub window_days: u32,
    /// Zone task dates and times are interpreted in: `"system"`, `"utc"` or
    /// a fixed offset such as `"+05:30"`.
    pub time_zone: LocalZone,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_secs: 60,
            refresh_interval_secs: 300,
            window_days: 7,
            time_zone: LocalZone::System,
        }
    }
}

impl ScheduleConfig {
    /// Evaluation cadence.
    pub fn evaluation_interval(&self) -> Duration {
        Duration::from_secs(self.evaluation_interval_secs)
    }

    /// Refetch cadence.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Notification windows and toast styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Hours before the due time during which an "upcoming" notice fires.
    pub upcoming_window_hours: u32,
    /// Completed tasks also suppress their pending reminder.
    pub suppress_completed_reminders: bool,
    /// Toast duration for upcoming and reminder notices.
    pub default_duration_ms: u64,
    /// Toast duration for overdue notices.
    pub overdue_duration_ms: u64,
    /// Dispatched notifications kept in history.
    pub history_limit: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            upcoming_window_hours: 24,
            suppress_completed_reminders: true,
            default_duration_ms: 5_000,
            overdue_duration_ms: 10_000,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl NotificationConfig {
    /// Toast durations.
    pub fn toast_style(&self) -> ToastStyle {
        ToastStyle {
            default_duration_ms: self.default_duration_ms,
            overdue_duration_ms: self.overdue_duration_ms,
        }
    }
}

/// User to activate at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl SessionConfig {
    /// The configured user, if an id is set.
    pub fn user(&self) -> Option<UserSession> {
        let id = self.user_id.as_deref()?.trim();
        if id.is_empty() {
            return None;
        }
        let mut session = UserSession::new(id);
        if let Some(name) = &self.user_name {
            session = session.with_name(name.clone());
        }
        Some(session)
    }
}

/// Log filter and optional log directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// Directory for daily rolling log files. Stderr only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "edu_reminders=info,task_api=info".to_owned(),
            directory: None,
        }
    }
}

impl ReminderConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ReminderError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ReminderError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config_dir>/edu-reminders/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("edu-reminders")
            .join("config.toml")
    }

    /// Check values the scheduler cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Config`] for zero intervals or window, and
    /// [`ReminderError::Api`] for an unusable API section.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        if self.schedule.evaluation_interval_secs == 0 {
            return Err(ReminderError::Config(
                "schedule.evaluation_interval_secs must be greater than 0".into(),
            ));
        }
        if self.schedule.refresh_interval_secs == 0 {
            return Err(ReminderError::Config(
                "schedule.refresh_interval_secs must be greater than 0".into(),
            ));
        }
        if self.schedule.window_days == 0 {
            return Err(ReminderError::Config(
                "schedule.window_days must be greater than 0".into(),
            ));
        }
        if self.notifications.upcoming_window_hours == 0 {
            return Err(ReminderError::Config(
                "notifications.upcoming_window_hours must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Evaluator tunables derived from this config.
    pub fn evaluator_settings(&self) -> EvaluatorSettings {
        EvaluatorSettings {
            zone: self.schedule.time_zone,
            upcoming_window: chrono::Duration::hours(i64::from(
                self.notifications.upcoming_window_hours,
            )),
            suppress_completed_reminders: self.notifications.suppress_completed_reminders,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn default_config_is_valid() {
        let config = ReminderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.schedule.evaluation_interval(), Duration::from_secs(60));
        assert_eq!(config.schedule.refresh_interval(), Duration::from_secs(300));
        assert_eq!(config.schedule.window_days, 7);
        assert_eq!(config.notifications.history_limit, 100);
        assert!(config.session.user().is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ReminderConfig::default();
        config.api.base_url = "https://school.example".into();
        config.schedule.time_zone = LocalZone::Fixed(FixedOffset::east_opt(5 * 3600 + 1800).unwrap());
        config.notifications.upcoming_window_hours = 12;
        config.session.user_id = Some("teacher-1".into());

        config.save_to_file(&path).unwrap();
        let loaded = ReminderConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[schedule]\nrefresh_interval_secs = 120\ntime_zone = \"utc\"\n\n[session]\nuser_id = \"student-9\"\nuser_name = \"Sam\"\n",
        )
        .unwrap();

        let config = ReminderConfig::from_file(&path).unwrap();
        assert_eq!(config.schedule.refresh_interval_secs, 120);
        assert_eq!(config.schedule.evaluation_interval_secs, 60);
        assert_eq!(config.schedule.time_zone, LocalZone::Utc);
        assert_eq!(config.api, ApiConfig::default());

        let user = config.session.user().unwrap();
        assert_eq!(user.id, "student-9");
        assert_eq!(user.name.as_deref(), Some("Sam"));
    }

    #[test]
    fn unparseable_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[schedule\nwindow_days = ").unwrap();
        assert!(matches!(
            ReminderConfig::from_file(&path),
            Err(ReminderError::Config(_))
        ));
    }

    #[test]
    fn bad_time_zone_is_rejected() {
        let err = toml::from_str::<ReminderConfig>("[schedule]\ntime_zone = \"mars\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn zero_intervals_rejected() {
        let mut config = ReminderConfig::default();
        config.schedule.evaluation_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ReminderConfig::default();
        config.schedule.window_days = 0;
        assert!(config.validate().is_err());

        let mut config = ReminderConfig::default();
        config.api.base_url = String::new();
        assert!(matches!(config.validate(), Err(ReminderError::Api(_))));
    }

    #[test]
    fn blank_user_id_is_no_session() {
        let session = SessionConfig {
            user_id: Some("  ".into()),
            user_name: None,
        };
        assert!(session.user().is_none());
    }

    #[test]
    fn evaluator_settings_follow_config() {
        let mut config = ReminderConfig::default();
        config.notifications.upcoming_window_hours = 6;
        config.notifications.suppress_completed_reminders = false;
        let settings = config.evaluator_settings();
        assert_eq!(settings.upcoming_window, chrono::Duration::hours(6));
        assert!(!settings.suppress_completed_reminders);
        assert_eq!(config.notifications.toast_style(), ToastStyle::default());
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = ReminderConfig::default_config_path();
        assert!(path.ends_with("edu-reminders/config.toml"));
    }
}
