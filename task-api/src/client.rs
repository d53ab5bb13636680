//! Typed client for the calendar task endpoints.

use crate::config::ApiConfig;
use crate::error::{Result, TaskApiError};
use crate::http::{build_client, excerpt};
use crate::types::{ReminderSentUpdate, TaskQuery, TaskRecord, TasksEnvelope, UpdateTaskResponse};
use url::Url;

/// Client for `GET`/`PUT` on the task collection.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    http: reqwest::Client,
    tasks_url: Url,
    auth_token: Option<String>,
}

impl TaskApiClient {
    /// Create a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskApiError::Config`] for an invalid configuration or
    /// [`TaskApiError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: build_client(config)?,
            tasks_url: config.tasks_url()?,
            auth_token: config.auth_token.clone(),
        })
    }

    /// The resolved task collection URL.
    pub fn tasks_url(&self) -> &Url {
        &self.tasks_url
    }

    /// Fetch the tasks visible to `query.user_id` in the query's date range.
    ///
    /// Entries that cannot be decoded are logged and skipped; the remaining
    /// records are returned.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses and an undecodable envelope.
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskRecord>> {
        let request = self.http.get(self.tasks_url.clone()).query(&[
            ("userId", query.user_id.as_str()),
            ("startDate", query.start_date.as_str()),
            ("endDate", query.end_date.as_str()),
        ]);

        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskApiError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let envelope: TasksEnvelope = response
            .json()
            .await
            .map_err(|e| TaskApiError::Decode(format!("task list: {e}")))?;

        let total = envelope.tasks.len();
        let records: Vec<TaskRecord> = envelope
            .tasks
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<TaskRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable task record");
                    None
                }
            })
            .collect();

        tracing::debug!(
            user_id = %query.user_id,
            total,
            decoded = records.len(),
            "fetched calendar tasks"
        );
        Ok(records)
    }

    /// Flag a task's reminder as delivered.
    ///
    /// Returns the updated task when the server echoes it back.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses, an undecodable body, or
    /// [`TaskApiError::Rejected`] when the server answers `success: false`.
    pub async fn mark_reminder_sent(
        &self,
        task_id: &str,
        user_id: &str,
    ) -> Result<Option<TaskRecord>> {
        let body = ReminderSentUpdate::new(task_id, user_id);
        let request = self.http.put(self.tasks_url.clone()).json(&body);

        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskApiError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let update: UpdateTaskResponse = response
            .json()
            .await
            .map_err(|e| TaskApiError::Decode(format!("task update: {e}")))?;

        if !update.success {
            let reason = update
                .error
                .unwrap_or_else(|| format!("server did not confirm update of task {task_id}"));
            return Err(TaskApiError::Rejected(reason));
        }

        tracing::debug!(task_id, "reminder marked as sent upstream");
        Ok(update.task)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
