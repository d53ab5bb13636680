//! Turns fired events into toasts and side effects.
//!
//! Every event becomes one styled [`Toast`]. Reminder events are also posted
//! to the [`ReminderBoard`] and trigger exactly one background
//! `mark_reminder_sent` call. The call is fire-and-forget: failures are
//! logged and never retried. Successes come back as [`ReminderAck`]s tagged
//! with the session generation they were issued under.

use crate::notify::board::ReminderBoard;
use crate::notify::event::{NotificationEvent, NotificationKind};
use crate::notify::history::NotificationHistory;
use crate::notify::sink::{NotificationSink, Toast, ToastVariant};
use crate::tasks::source::TaskSource;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Toast durations by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastStyle {
    pub default_duration_ms: u64,
    pub overdue_duration_ms: u64,
}

impl Default for ToastStyle {
    fn default() -> Self {
        Self {
            default_duration_ms: 5_000,
            overdue_duration_ms: 10_000,
        }
    }
}

impl ToastStyle {
    /// Build the toast for `event`.
    pub fn render(&self, event: &NotificationEvent) -> Toast {
        let (title, variant, duration_ms) = match event.kind {
            NotificationKind::Overdue => {
                ("Task overdue", ToastVariant::Destructive, self.overdue_duration_ms)
            }
            NotificationKind::Upcoming => {
                ("Upcoming task", ToastVariant::Default, self.default_duration_ms)
            }
            NotificationKind::Reminder => {
                ("Task reminder", ToastVariant::Default, self.default_duration_ms)
            }
        };
        Toast {
            title: title.to_owned(),
            description: event.message.clone(),
            variant,
            duration_ms,
        }
    }
}

/// A reminder the server confirmed as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderAck {
    /// Session generation the request was issued under.
    pub generation: u64,
    pub task_id: String,
}

/// Delivers events for one active session.
pub struct Dispatcher {
    sink: Arc<dyn NotificationSink>,
    source: Arc<dyn TaskSource>,
    style: ToastStyle,
    generation: u64,
    acks: mpsc::UnboundedSender<ReminderAck>,
    board: ReminderBoard,
    history: NotificationHistory,
}

impl Dispatcher {
    /// Create a dispatcher for the session identified by `generation`.
    pub fn new(
        sink: Arc<dyn NotificationSink>,
        source: Arc<dyn TaskSource>,
        style: ToastStyle,
        generation: u64,
        acks: mpsc::UnboundedSender<ReminderAck>,
        history_limit: usize,
    ) -> Self {
        Self {
            sink,
            source,
            style,
            generation,
            acks,
            board: ReminderBoard::new(),
            history: NotificationHistory::with_limit(history_limit),
        }
    }

    /// Show `event` and run its side effects.
    ///
    /// Sink failures are logged; the event is still recorded as shown so the
    /// ledger and history stay consistent with what was attempted.
    pub fn dispatch(&mut self, mut event: NotificationEvent, user_id: &str) {
        let toast = self.style.render(&event);
        if let Err(e) = self.sink.show(&toast) {
            warn!(task_id = %event.task_id, kind = %event.kind, error = %e, "failed to show toast");
        }
        event.shown = true;

        if event.kind == NotificationKind::Reminder {
            self.board.post(event.clone());
            self.spawn_mark_sent(&event.task_id, user_id);
        }

        debug!(task_id = %event.task_id, kind = %event.kind, "notification dispatched");
        self.history.push(event);
    }

    fn spawn_mark_sent(&self, task_id: &str, user_id: &str) {
        let source = Arc::clone(&self.source);
        let acks = self.acks.clone();
        let generation = self.generation;
        let task_id = task_id.to_owned();
        let user_id = user_id.to_owned();

        tokio::spawn(async move {
            match source.mark_reminder_sent(&task_id, &user_id).await {
                Ok(()) => {
                    info!(%task_id, "reminder marked as sent");
                    // Receiver gone means the scheduler shut down.
                    let _ = acks.send(ReminderAck {
                        generation,
                        task_id,
                    });
                }
                Err(e) => {
                    warn!(%task_id, error = %e, "failed to mark reminder as sent");
                }
            }
        });
    }

    /// Session generation this dispatcher belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Persistent reminder banners.
    pub fn board(&self) -> &ReminderBoard {
        &self.board
    }

    /// Take one reminder banner down. Returns `true` when it was on the board.
    pub fn dismiss(&mut self, event_id: &str) -> bool {
        match self.board.dismiss(event_id) {
            Some(event) => {
                self.history.mark_dismissed(&event.id);
                true
            }
            None => false,
        }
    }

    /// Take every reminder banner down, returning how many there were.
    pub fn dismiss_all(&mut self) -> usize {
        let dismissed = self.board.dismiss_all();
        for event in &dismissed {
            self.history.mark_dismissed(&event.id);
        }
        dismissed.len()
    }

    /// Dispatched notifications.
    pub fn history(&self) -> &NotificationHistory {
        &self.history
    }
}
