//! Wire types for the calendar task endpoints.
//!
//! Field names follow the platform's camelCase JSON. Dates and times stay as
//! strings here; validation into typed values happens in the consumer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a calendar task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Homework or coursework with a due date.
    Assignment,
    /// A plain personal reminder.
    Reminder,
    /// A school event.
    Event,
    /// A meeting (parent-teacher, staff, ...).
    Meeting,
}

impl TaskKind {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Reminder => "reminder",
            Self::Event => "event",
            Self::Meeting => "meeting",
        }
    }

    /// Capitalized display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Assignment => "Assignment",
            Self::Reminder => "Reminder",
            Self::Event => "Event",
            Self::Meeting => "Meeting",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority as set by its creator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(name)
    }
}

/// Per-task reminder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderSettings {
    /// Whether a reminder should fire at all.
    pub enabled: bool,
    /// Minutes before the scheduled instant at which the reminder opens.
    #[serde(rename = "remindBefore", alias = "remindBeforeMinutes")]
    pub remind_before: u32,
    /// Set by the server once a reminder has been delivered.
    pub reminder_sent: bool,
}

/// The user who created a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskCreator {
    pub id: String,
    pub name: String,
    /// `student`, `teacher` or `parent`.
    pub role: String,
}

/// One task as returned by the task query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// 12-hour clock, e.g. `9:30 AM`.
    pub time: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, rename = "reminderSettings", alias = "reminderConfig")]
    pub reminder_settings: ReminderSettings,
    #[serde(default)]
    pub created_by: TaskCreator,
    #[serde(default)]
    pub is_completed: bool,
}

/// Parameters of the task query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub user_id: String,
    /// Inclusive range start, `YYYY-MM-DD`.
    pub start_date: String,
    /// Inclusive range end, `YYYY-MM-DD`.
    pub end_date: String,
}

impl TaskQuery {
    /// Create a query for `user_id` over `[start_date, end_date]`.
    pub fn new(
        user_id: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

/// Body of a successful task query. Records are kept as raw JSON so that one
/// malformed entry does not poison the whole list. The `tasks` key itself is
/// required.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TasksEnvelope {
    pub tasks: Vec<serde_json::Value>,
}

/// Body of the reminder-sent mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSentUpdate {
    pub id: String,
    pub user_id: String,
    pub reminder_settings: ReminderSentPatch,
}

/// Partial reminder settings carried by [`ReminderSentUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSentPatch {
    pub reminder_sent: bool,
}

impl ReminderSentUpdate {
    /// Build the mutation that flags `task_id` as reminded.
    pub fn new(task_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: task_id.into(),
            user_id: user_id.into(),
            reminder_settings: ReminderSentPatch {
                reminder_sent: true,
            },
        }
    }
}

/// Response of the reminder-sent mutation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskResponse {
    #[serde(default)]
    pub task: Option<TaskRecord>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_record_decodes_platform_json() {
        let value = json!({
            "id": "t-1",
            "title": "Essay draft",
            "date": "2025-01-16",
            "time": "10:00 AM",
            "type": "assignment",
            "priority": "high",
            "reminderSettings": {"enabled": true, "remindBefore": 60, "reminderSent": false},
            "createdBy": {"id": "u-9", "name": "Ms. Rivera", "role": "teacher"},
            "isCompleted": false
        });
        let record: TaskRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.kind, TaskKind::Assignment);
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.reminder_settings.remind_before, 60);
        assert_eq!(record.created_by.role, "teacher");
        assert!(!record.is_completed);
    }

    #[test]
    fn envelope_without_tasks_key_is_rejected() {
        assert!(serde_json::from_value::<TasksEnvelope>(json!({"error": "db down"})).is_err());
        let empty: TasksEnvelope = serde_json::from_value(json!({"tasks": []})).unwrap();
        assert!(empty.tasks.is_empty());
    }

    #[test]
    fn reminder_config_alias_accepted() {
        let value = json!({
            "id": "t-2",
            "title": "Staff meeting",
            "date": "2025-01-16",
            "time": "3:00 PM",
            "type": "meeting",
            "reminderConfig": {"enabled": true, "remindBeforeMinutes": 15}
        });
        let record: TaskRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.reminder_settings.remind_before, 15);
        assert!(!record.reminder_settings.reminder_sent);
        assert_eq!(record.priority, Priority::Medium);
    }

    #[test]
    fn unknown_kind_fails_to_decode() {
        let value = json!({
            "id": "t-3",
            "title": "?",
            "date": "2025-01-16",
            "time": "3:00 PM",
            "type": "holiday"
        });
        assert!(serde_json::from_value::<TaskRecord>(value).is_err());
    }

    #[test]
    fn reminder_sent_update_shape() {
        let body = serde_json::to_value(ReminderSentUpdate::new("t-1", "u-1")).unwrap();
        assert_eq!(
            body,
            json!({"id": "t-1", "userId": "u-1", "reminderSettings": {"reminderSent": true}})
        );
    }

    #[test]
    fn kind_labels_are_capitalized() {
        assert_eq!(TaskKind::Assignment.label(), "Assignment");
        assert_eq!(TaskKind::Meeting.to_string(), "meeting");
    }
}
