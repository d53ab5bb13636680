//! Notification events produced by the evaluator.

use crate::tasks::model::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a notification fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// The task is due within the upcoming window.
    Upcoming,
    /// The task's scheduled instant has passed and it is not completed.
    Overdue,
    /// The task's own reminder window is open.
    Reminder,
}

impl NotificationKind {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Overdue => "overdue",
            Self::Reminder => "reminder",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One firing decision. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationEvent {
    /// Unique per firing.
    pub id: String,
    /// The task that triggered it.
    pub task_id: String,
    pub kind: NotificationKind,
    /// Title of the triggering task.
    pub title: String,
    pub message: String,
    pub priority: Priority,
    /// When the task is due.
    pub scheduled_at: DateTime<Utc>,
    /// When the evaluator emitted the event.
    pub fired_at: DateTime<Utc>,
    /// Set by the dispatcher once rendered.
    pub shown: bool,
    /// Set when the user dismisses the reminder banner.
    pub dismissed: bool,
}

impl NotificationEvent {
    /// Create an unshown, undismissed event with a fresh id.
    pub fn new(
        task_id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
        scheduled_at: DateTime<Utc>,
        fired_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            task_id: task_id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            priority,
            scheduled_at,
            fired_at,
            shown: false,
            dismissed: false,
        }
    }
}
