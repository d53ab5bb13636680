//! Task source adapter.
//!
//! The scheduler only needs two things from task storage: the tasks a user
//! can see in a bounded date window, and a way to flag a reminder as sent.
//! [`TaskSource`] is that seam; [`HttpTaskSource`] implements it against the
//! platform's calendar task API.

use crate::error::Result;
use crate::tasks::model::Task;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use task_api::{ApiConfig, TaskApiClient, TaskQuery};
use tracing::{debug, warn};

/// Inclusive calendar-date range of tasks to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskWindow {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl TaskWindow {
    /// `[today, today + days]`.
    pub fn starting(today: NaiveDate, days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Query parameters for `user_id` over this window.
    pub fn query_for(&self, user_id: &str) -> TaskQuery {
        TaskQuery::new(
            user_id,
            self.start.format("%Y-%m-%d").to_string(),
            self.end.format("%Y-%m-%d").to_string(),
        )
    }
}

/// Where tasks come from and where reminder delivery is recorded.
///
/// Visibility (owned or assigned tasks) is the implementation's concern.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Load the tasks `user_id` may see within `window`.
    async fn load_tasks(&self, user_id: &str, window: TaskWindow) -> Result<Vec<Task>>;

    /// Persist `reminder_sent = true` for `task_id`.
    async fn mark_reminder_sent(&self, task_id: &str, user_id: &str) -> Result<()>;
}

/// [`TaskSource`] backed by the calendar task HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTaskSource {
    client: TaskApiClient,
}

impl HttpTaskSource {
    /// Build a source for the API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Api`](crate::ReminderError::Api) when the
    /// configuration is invalid.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: TaskApiClient::new(config)?,
        })
    }
}

#[async_trait]
impl TaskSource for HttpTaskSource {
    async fn load_tasks(&self, user_id: &str, window: TaskWindow) -> Result<Vec<Task>> {
        let records = self.client.list_tasks(&window.query_for(user_id)).await?;
        let fetched = records.len();

        let tasks: Vec<Task> = records
            .into_iter()
            .filter_map(|record| match Task::try_from(record) {
                Ok(task) => Some(task),
                Err(e) => {
                    warn!(error = %e, "dropping task with invalid schedule");
                    None
                }
            })
            .collect();

        debug!(user_id, fetched, valid = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    async fn mark_reminder_sent(&self, task_id: &str, user_id: &str) -> Result<()> {
        self.client.mark_reminder_sent(task_id, user_id).await?;
        Ok(())
    }
}
