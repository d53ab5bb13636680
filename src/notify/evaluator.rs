//! Decides which notifications should fire at a given instant.
//!
//! Each task is checked against three independent windows:
//!
//! | kind     | fires when                                          |
//! |----------|-----------------------------------------------------|
//! | reminder | `scheduled - remind_before <= now <= scheduled`     |
//! | upcoming | `scheduled - upcoming_window <= now < scheduled`    |
//! | overdue  | `scheduled < now`                                   |
//!
//! Completed tasks never fire. A [`FiredLedger`] makes every
//! `(task, kind)` pair fire at most once, so the same task list can be
//! re-evaluated on every tick.

use crate::clock::LocalZone;
use crate::notify::event::{NotificationEvent, NotificationKind};
use crate::notify::ledger::FiredLedger;
use crate::tasks::model::{Priority, Task};
use crate::time::{count_with_unit, format_relative_past};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

/// Tunables for [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorSettings {
    /// Zone task dates and times are read in.
    pub zone: LocalZone,
    /// Length of the upcoming window before the scheduled instant.
    pub upcoming_window: Duration,
    /// When `true`, completing a task also silences its pending reminder.
    pub suppress_completed_reminders: bool,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            zone: LocalZone::System,
            upcoming_window: Duration::hours(24),
            suppress_completed_reminders: true,
        }
    }
}

/// Evaluate `tasks` at `now`, returning the events that fire for the first time.
///
/// Per task the order is reminder, upcoming, overdue. Tasks whose local time
/// does not exist in the configured zone are skipped with a warning.
pub fn evaluate(
    tasks: &[Task],
    now: DateTime<Utc>,
    ledger: &mut FiredLedger,
    settings: &EvaluatorSettings,
) -> Vec<NotificationEvent> {
    let mut events = Vec::new();

    for task in tasks {
        let scheduled = match task.scheduled_at(settings.zone) {
            Ok(at) => at,
            Err(e) => {
                warn!(task_id = %task.id, error = %e, "skipping task without a valid scheduled instant");
                continue;
            }
        };

        if reminder_window_open(task, scheduled, now, settings)
            && ledger.record_once(&task.id, NotificationKind::Reminder)
        {
            let message = format!(
                "\"{}\" is due in {}",
                task.title,
                count_with_unit(i64::from(task.reminder.remind_before_minutes), "minute")
            );
            events.push(fire(task, NotificationKind::Reminder, message, task.priority, scheduled, now));
        }

        if upcoming_window_open(task, scheduled, now, settings)
            && ledger.record_once(&task.id, NotificationKind::Upcoming)
        {
            let message = format!(
                "{} due in {}: {}",
                task.kind.label(),
                count_with_unit(hours_remaining(scheduled, now), "hour"),
                task.title
            );
            events.push(fire(task, NotificationKind::Upcoming, message, task.priority, scheduled, now));
        }

        if is_overdue(task, scheduled, now) && ledger.record_once(&task.id, NotificationKind::Overdue) {
            let message = format!(
                "\"{}\" was due {}",
                task.title,
                format_relative_past(scheduled, now)
            );
            events.push(fire(task, NotificationKind::Overdue, message, Priority::High, scheduled, now));
        }
    }

    events
}

fn reminder_window_open(
    task: &Task,
    scheduled: DateTime<Utc>,
    now: DateTime<Utc>,
    settings: &EvaluatorSettings,
) -> bool {
    let reminder = &task.reminder;
    if !reminder.enabled || reminder.reminder_sent {
        return false;
    }
    if task.is_completed && settings.suppress_completed_reminders {
        return false;
    }
    let opens = scheduled - Duration::minutes(i64::from(reminder.remind_before_minutes));
    opens <= now && now <= scheduled
}

fn upcoming_window_open(
    task: &Task,
    scheduled: DateTime<Utc>,
    now: DateTime<Utc>,
    settings: &EvaluatorSettings,
) -> bool {
    !task.is_completed && scheduled - settings.upcoming_window <= now && now < scheduled
}

fn is_overdue(task: &Task, scheduled: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    !task.is_completed && scheduled < now
}

/// Whole hours until `scheduled`, rounded up.
fn hours_remaining(scheduled: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (scheduled - now).num_seconds().max(0);
    (secs + 3599) / 3600
}

fn fire(
    task: &Task,
    kind: NotificationKind,
    message: String,
    priority: Priority,
    scheduled: DateTime<Utc>,
    now: DateTime<Utc>,
) -> NotificationEvent {
    debug!(task_id = %task.id, %kind, "notification fired");
    NotificationEvent::new(&task.id, kind, &task.title, message, priority, scheduled, now)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::tasks::model::TaskKind;
    use chrono::{NaiveDate, TimeZone};

    fn settings() -> EvaluatorSettings {
        EvaluatorSettings {
            zone: LocalZone::Utc,
            ..EvaluatorSettings::default()
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 16, h, m, 0).unwrap()
    }

    fn essay() -> Task {
        Task::new(
            "t-1",
            "Essay",
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap(),
            "10:00 AM".parse().unwrap(),
            TaskKind::Assignment,
        )
        .with_priority(Priority::Low)
    }

    fn kinds(events: &[NotificationEvent]) -> Vec<NotificationKind> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn upcoming_rounds_hours_up() {
        let mut ledger = FiredLedger::new();
        let events = evaluate(&[essay()], at(7, 30), &mut ledger, &settings());
        assert_eq!(kinds(&events), vec![NotificationKind::Upcoming]);
        assert_eq!(events[0].message, "Assignment due in 3 hours: Essay");
        assert_eq!(events[0].priority, Priority::Low);
    }

    #[test]
    fn upcoming_singular_hour() {
        let mut ledger = FiredLedger::new();
        let events = evaluate(&[essay()], at(9, 59), &mut ledger, &settings());
        assert_eq!(events[0].message, "Assignment due in 1 hour: Essay");
    }

    #[test]
    fn upcoming_window_boundaries() {
        let task = essay();
        let window_open = at(10, 0) - Duration::hours(24);

        let mut ledger = FiredLedger::new();
        assert!(evaluate(&[task.clone()], window_open - Duration::minutes(1), &mut ledger, &settings()).is_empty());
        let events = evaluate(&[task.clone()], window_open, &mut ledger, &settings());
        assert_eq!(kinds(&events), vec![NotificationKind::Upcoming]);
        assert_eq!(events[0].message, "Assignment due in 24 hours: Essay");

        let mut fresh = FiredLedger::new();
        let at_due = evaluate(&[task], at(10, 0), &mut fresh, &settings());
        assert!(at_due.is_empty(), "neither upcoming nor overdue at the exact instant");
    }

    #[test]
    fn overdue_forces_high_priority() {
        let mut ledger = FiredLedger::new();
        let events = evaluate(&[essay()], at(11, 0), &mut ledger, &settings());
        assert_eq!(kinds(&events), vec![NotificationKind::Overdue]);
        assert_eq!(events[0].priority, Priority::High);
        assert_eq!(events[0].message, "\"Essay\" was due 1 hour ago");
    }

    #[test]
    fn reminder_and_upcoming_can_fire_together() {
        let mut ledger = FiredLedger::new();
        let task = essay().with_reminder(60);
        let events = evaluate(&[task], at(9, 15), &mut ledger, &settings());
        assert_eq!(
            kinds(&events),
            vec![NotificationKind::Reminder, NotificationKind::Upcoming]
        );
        assert_eq!(events[0].message, "\"Essay\" is due in 60 minutes");
    }

    #[test]
    fn reminder_window_is_inclusive_at_both_ends() {
        let task = essay().with_reminder(30);

        let mut ledger = FiredLedger::new();
        let opened = evaluate(&[task.clone()], at(9, 30), &mut ledger, &settings());
        assert!(kinds(&opened).contains(&NotificationKind::Reminder));

        let mut ledger = FiredLedger::new();
        let closing = evaluate(&[task.clone()], at(10, 0), &mut ledger, &settings());
        assert_eq!(kinds(&closing), vec![NotificationKind::Reminder]);

        let mut ledger = FiredLedger::new();
        let early = evaluate(&[task.clone()], at(9, 29), &mut ledger, &settings());
        assert!(!kinds(&early).contains(&NotificationKind::Reminder));

        let mut ledger = FiredLedger::new();
        let late = evaluate(&[task], at(10, 1), &mut ledger, &settings());
        assert!(!kinds(&late).contains(&NotificationKind::Reminder));
    }

    #[test]
    fn sent_or_disabled_reminders_stay_quiet() {
        let mut sent = essay().with_reminder(60);
        sent.mark_reminder_sent();
        let mut disabled = essay().with_reminder(60);
        disabled.id = "t-2".into();
        disabled.reminder.enabled = false;

        let mut ledger = FiredLedger::new();
        let events = evaluate(&[sent, disabled], at(9, 30), &mut ledger, &settings());
        assert!(!kinds(&events).contains(&NotificationKind::Reminder));
    }

    #[test]
    fn completed_tasks_fire_nothing_by_default() {
        let task = essay().with_reminder(60).completed();
        let mut ledger = FiredLedger::new();
        for now in [at(8, 0), at(9, 30), at(11, 0), at(23, 0)] {
            assert!(evaluate(&[task.clone()], now, &mut ledger, &settings()).is_empty());
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn completed_reminder_fires_when_not_suppressed() {
        let task = essay().with_reminder(60).completed();
        let lenient = EvaluatorSettings {
            suppress_completed_reminders: false,
            ..settings()
        };
        let mut ledger = FiredLedger::new();
        let events = evaluate(&[task], at(9, 30), &mut ledger, &lenient);
        assert_eq!(kinds(&events), vec![NotificationKind::Reminder]);
    }

    #[test]
    fn repeated_evaluation_is_empty() {
        let tasks = vec![essay().with_reminder(60)];
        let mut ledger = FiredLedger::new();
        let first = evaluate(&tasks, at(9, 15), &mut ledger, &settings());
        assert_eq!(first.len(), 2);
        let second = evaluate(&tasks, at(9, 15), &mut ledger, &settings());
        assert!(second.is_empty());
    }

    #[test]
    fn custom_upcoming_window() {
        let narrow = EvaluatorSettings {
            upcoming_window: Duration::hours(2),
            ..settings()
        };
        let mut ledger = FiredLedger::new();
        assert!(evaluate(&[essay()], at(7, 30), &mut ledger, &narrow).is_empty());
        assert_eq!(evaluate(&[essay()], at(8, 30), &mut ledger, &narrow).len(), 1);
    }
}
