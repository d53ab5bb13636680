//! Domain representation of a calendar task.
//!
//! [`Task`] is the validated form of a [`TaskRecord`]: its date and time have
//! already been parsed, so every task in memory has a well-defined scheduled
//! instant once a zone is chosen.

use crate::clock::LocalZone;
use crate::error::{ReminderError, Result};
use crate::time::{WallClockTime, parse_date};
use chrono::{DateTime, NaiveDate, Utc};
use task_api::TaskRecord;

pub use task_api::types::{Priority, TaskCreator, TaskKind};

/// Reminder configuration of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReminderSettings {
    /// Whether a reminder should fire at all.
    pub enabled: bool,
    /// Length of the reminder window before the scheduled instant.
    pub remind_before_minutes: u32,
    /// Set once the reminder was delivered. Never goes back to `false`
    /// within this subsystem.
    pub reminder_sent: bool,
}

impl From<task_api::ReminderSettings> for ReminderSettings {
    fn from(wire: task_api::ReminderSettings) -> Self {
        Self {
            enabled: wire.enabled,
            remind_before_minutes: wire.remind_before,
            reminder_sent: wire.reminder_sent,
        }
    }
}

/// A schedulable item owned by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Opaque identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Calendar date the task is due.
    pub date: NaiveDate,
    /// Time of day the task is due.
    pub time: WallClockTime,
    /// What the task represents.
    pub kind: TaskKind,
    /// Creator-assigned priority.
    pub priority: Priority,
    /// Reminder configuration.
    pub reminder: ReminderSettings,
    /// Who created the task.
    pub created_by: TaskCreator,
    /// Completed tasks never notify.
    pub is_completed: bool,
}

impl Task {
    /// Create an incomplete, medium-priority task without a reminder.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
        time: WallClockTime,
        kind: TaskKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            date,
            time,
            kind,
            priority: Priority::default(),
            reminder: ReminderSettings::default(),
            created_by: TaskCreator::default(),
            is_completed: false,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Enable an unsent reminder `minutes` before the scheduled instant.
    pub fn with_reminder(mut self, minutes: u32) -> Self {
        self.reminder = ReminderSettings {
            enabled: true,
            remind_before_minutes: minutes,
            reminder_sent: false,
        };
        self
    }

    /// Mark the task as completed.
    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    /// The absolute instant the task is due, reading its date and time in `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::InvalidTime`] when the local time does not
    /// exist in `zone`.
    pub fn scheduled_at(&self, zone: LocalZone) -> Result<DateTime<Utc>> {
        zone.resolve(self.date, self.time)
    }

    /// Flag the reminder as delivered.
    pub fn mark_reminder_sent(&mut self) {
        self.reminder.reminder_sent = true;
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = ReminderError;

    fn try_from(record: TaskRecord) -> Result<Self> {
        let date = parse_date(&record.date).map_err(|e| for_task(&record.id, e))?;
        let time: WallClockTime = record
            .time
            .parse()
            .map_err(|e| for_task(&record.id, e))?;

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            date,
            time,
            kind: record.kind,
            priority: record.priority,
            reminder: record.reminder_settings.into(),
            created_by: record.created_by,
            is_completed: record.is_completed,
        })
    }
}

fn for_task(task_id: &str, err: ReminderError) -> ReminderError {
    match err {
        ReminderError::InvalidTime(reason) => {
            ReminderError::InvalidTime(format!("task {task_id}: {reason}"))
        }
        other => other,
    }
}
