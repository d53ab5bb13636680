//! In-memory record of which notifications already fired.

use crate::notify::event::NotificationKind;
use std::collections::HashSet;

/// At-most-once guard for `(task_id, kind)` pairs.
///
/// Owned by the active scheduler session and dropped with it; nothing is
/// persisted, so the guarantee lasts as long as the session does.
#[derive(Debug, Clone, Default)]
pub struct FiredLedger {
    fired: HashSet<(String, NotificationKind)>,
}

impl FiredLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pair. Returns `true` the first time, `false` on repeats.
    pub fn record_once(&mut self, task_id: &str, kind: NotificationKind) -> bool {
        if self.contains(task_id, kind) {
            return false;
        }
        self.fired.insert((task_id.to_owned(), kind))
    }

    /// Whether the pair has fired.
    pub fn contains(&self, task_id: &str, kind: NotificationKind) -> bool {
        self.fired.contains(&(task_id.to_owned(), kind))
    }

    /// Number of recorded pairs.
    pub fn len(&self) -> usize {
        self.fired.len()
    }

    /// `true` when nothing has fired.
    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}
