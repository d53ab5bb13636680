//! In-memory [`TaskSource`] implementation.
//!
//! Used by tests and by embedders that want to exercise the scheduler without
//! a running platform. Failures can be injected per operation and every call
//! is counted.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{ReminderError, Result};
use crate::tasks::model::Task;
use crate::tasks::source::{TaskSource, TaskWindow};

/// An in-memory task store.
///
/// `load_tasks` returns the tasks whose date falls inside the requested
/// window; the user id is ignored. `mark_reminder_sent` flips the stored
/// task's flag so a later load reflects it.
#[derive(Default)]
pub struct MockTaskSource {
    tasks: Mutex<Vec<Task>>,
    marked: Mutex<Vec<String>>,
    fail_loads: AtomicBool,
    fail_marks: AtomicBool,
    load_calls: AtomicUsize,
    mark_calls: AtomicUsize,
}

impl MockTaskSource {
    /// Create a source seeded with `tasks`.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    /// Replace the stored tasks.
    pub fn set_tasks(&self, tasks: Vec<Task>) {
        *self.tasks.lock().unwrap_or_else(|e| e.into_inner()) = tasks;
    }

    /// Snapshot of the stored tasks.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make subsequent loads fail (or succeed again).
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent mark-sent calls fail (or succeed again).
    pub fn fail_marks(&self, fail: bool) {
        self.fail_marks.store(fail, Ordering::SeqCst);
    }

    /// Number of `load_tasks` calls so far, including failed ones.
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Number of `mark_reminder_sent` calls so far, including failed ones.
    pub fn mark_calls(&self) -> usize {
        self.mark_calls.load(Ordering::SeqCst)
    }

    /// Task ids successfully marked as reminded, in call order.
    pub fn marked(&self) -> Vec<String> {
        self.marked.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TaskSource for MockTaskSource {
    async fn load_tasks(&self, _user_id: &str, window: TaskWindow) -> Result<Vec<Task>> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(ReminderError::Source("mock load failure".to_owned()));
        }

        let tasks = self
            .tasks
            .lock()
            .map_err(|_| ReminderError::Source("mock lock poisoned".to_owned()))?;
        Ok(tasks
            .iter()
            .filter(|t| window.contains(t.date))
            .cloned()
            .collect())
    }

    async fn mark_reminder_sent(&self, task_id: &str, _user_id: &str) -> Result<()> {
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_marks.load(Ordering::SeqCst) {
            return Err(ReminderError::Source("mock mark failure".to_owned()));
        }

        let mut tasks = self
            .tasks
            .lock()
            .map_err(|_| ReminderError::Source("mock lock poisoned".to_owned()))?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ReminderError::Source(format!("task {task_id} not found")))?;
        task.mark_reminder_sent();

        self.marked
            .lock()
            .map_err(|_| ReminderError::Source("mock lock poisoned".to_owned()))?
            .push(task_id.to_owned());
        Ok(())
    }
}
