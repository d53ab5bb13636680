//! Error types for the reminder scheduler.

/// Top-level error type for the reminder subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    /// A task date or 12-hour time string could not be turned into an instant.
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Calendar task API error.
    #[error("task API error: {0}")]
    Api(#[from] task_api::TaskApiError),

    /// Task source error not originating from the HTTP API.
    #[error("task source error: {0}")]
    Source(String),

    /// The UI notification sink refused a toast.
    #[error("notification sink error: {0}")]
    Sink(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scheduler lifecycle error.
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ReminderError>;
