//! Bounded list of recently dispatched notifications.

use crate::notify::event::NotificationEvent;
use crate::time::format_relative_past;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// One history row ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub event: NotificationEvent,
    /// e.g. `"5 minutes ago"`.
    pub fired: String,
}

/// Recently dispatched notifications, oldest dropped first.
#[derive(Debug, Clone)]
pub struct NotificationHistory {
    entries: VecDeque<NotificationEvent>,
    limit: usize,
}

impl Default for NotificationHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl NotificationHistory {
    /// Keep at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Append `event`, trimming the oldest entries past the limit.
    pub fn push(&mut self, event: NotificationEvent) {
        self.entries.push_back(event);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first, each labelled relative to `now`.
    pub fn recent(&self, now: DateTime<Utc>) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .rev()
            .map(|event| HistoryEntry {
                fired: format_relative_past(event.fired_at, now),
                event: event.clone(),
            })
            .collect()
    }

    /// Flag the entry for `event_id` as dismissed, if it is still kept.
    pub fn mark_dismissed(&mut self, event_id: &str) {
        if let Some(event) = self.entries.iter_mut().find(|e| e.id == event_id) {
            event.dismissed = true;
        }
    }
}
