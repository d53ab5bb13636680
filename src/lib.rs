//! edu-reminders: calendar task reminders and notifications.
//!
//! Loads a user's upcoming calendar tasks, decides which notifications are
//! due relative to the wall clock and shows each at most once.
//!
//! # Architecture
//!
//! - **Tasks** ([`tasks`]): domain model plus the [`TaskSource`] seam and its
//!   HTTP implementation over the `task-api` crate
//! - **Evaluator** ([`notify::evaluate`]): pure window checks de-duplicated
//!   by a [`FiredLedger`]
//! - **Dispatcher** ([`notify::Dispatcher`]): styled toasts, the persistent
//!   reminder board and the background "reminder sent" write
//! - **Scheduler** ([`scheduler::Scheduler`]): the session-driven polling loop

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod scheduler;
pub mod tasks;
pub mod time;

pub use clock::{Clock, LocalZone, ManualClock, SystemClock};
pub use config::ReminderConfig;
pub use error::{ReminderError, Result};
pub use notify::{FiredLedger, NotificationEvent, NotificationKind, NotificationSink, Toast};
pub use scheduler::{Scheduler, SchedulerHandle, SchedulerSettings, SchedulerSnapshot, UserSession};
pub use tasks::{HttpTaskSource, Task, TaskSource};
