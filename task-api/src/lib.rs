//! # task-api
//!
//! HTTP client for the education platform's calendar task endpoints.
//!
//! Two operations are exposed, both against the same collection URL:
//!
//! - `GET  {tasks}?userId=..&startDate=..&endDate=..` → `{ "tasks": [...] }`
//! - `PUT  {tasks}` with `{ id, userId, reminderSettings: { reminderSent: true } }`
//!   → `{ task, success }`
//!
//! Access control (which tasks a user may see) is enforced by the server.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::TaskApiClient;
pub use config::ApiConfig;
pub use error::{Result, TaskApiError};
pub use types::{Priority, ReminderSettings, TaskCreator, TaskKind, TaskQuery, TaskRecord};
