//! Persistent on-screen reminder banners.
//!
//! Unlike toasts, reminder banners stay until the user dismisses them.
//! Dismissing takes the banner off the board; the session history keeps the
//! record.

use crate::notify::event::NotificationEvent;

/// Reminder banners of the current session.
#[derive(Debug, Clone, Default)]
pub struct ReminderBoard {
    entries: Vec<NotificationEvent>,
}

impl ReminderBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a banner. A second event with the same id is ignored.
    pub fn post(&mut self, event: NotificationEvent) {
        if self.entries.iter().any(|e| e.id == event.id) {
            return;
        }
        self.entries.push(event);
    }

    /// Banners on screen, oldest first.
    pub fn active(&self) -> &[NotificationEvent] {
        &self.entries
    }

    /// Take one banner down, returning it marked dismissed.
    pub fn dismiss(&mut self, event_id: &str) -> Option<NotificationEvent> {
        let index = self.entries.iter().position(|e| e.id == event_id)?;
        let mut event = self.entries.remove(index);
        event.dismissed = true;
        Some(event)
    }

    /// Take every banner down.
    pub fn dismiss_all(&mut self) -> Vec<NotificationEvent> {
        self.entries
            .drain(..)
            .map(|mut event| {
                event.dismissed = true;
                event
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::notify::event::NotificationKind;
    use crate::tasks::model::Priority;
    use chrono::{TimeZone, Utc};

    fn reminder(task_id: &str) -> NotificationEvent {
        let at = Utc.with_ymd_and_hms(2025, 1, 16, 10, 0, 0).unwrap();
        NotificationEvent::new(
            task_id,
            NotificationKind::Reminder,
            "Essay",
            "\"Essay\" is due in 60 minutes",
            Priority::Medium,
            at,
            at,
        )
    }

    #[test]
    fn dismissing_removes_the_banner() {
        let mut board = ReminderBoard::new();
        let first = reminder("t-1");
        let first_id = first.id.clone();
        board.post(first);
        board.post(reminder("t-2"));
        assert_eq!(board.active().len(), 2);

        let dismissed = board.dismiss(&first_id).unwrap();
        assert!(dismissed.dismissed);
        assert!(board.dismiss(&first_id).is_none(), "second dismissal is a no-op");
        let active = board.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].task_id, "t-2");
    }

    #[test]
    fn board_does_not_grow_across_dismissals() {
        let mut board = ReminderBoard::new();
        for i in 0..50 {
            let event = reminder(&format!("t-{i}"));
            let id = event.id.clone();
            board.post(event);
            board.dismiss(&id);
        }
        assert!(board.active().is_empty());
    }

    #[test]
    fn duplicate_posts_are_ignored() {
        let mut board = ReminderBoard::new();
        let event = reminder("t-1");
        board.post(event.clone());
        board.post(event);
        assert_eq!(board.active().len(), 1);
    }

    #[test]
    fn dismiss_all_counts_active() {
        let mut board = ReminderBoard::new();
        board.post(reminder("t-1"));
        board.post(reminder("t-2"));
        let first_id = board.active()[0].id.clone();
        board.dismiss(&first_id);
        let rest = board.dismiss_all();
        assert_eq!(rest.len(), 1);
        assert!(rest[0].dismissed);
        assert!(board.active().is_empty());
        assert!(board.dismiss("unknown").is_none());
    }
}
