//! Reminder scheduler.
//!
//! Follows the signed-in user, polls the task source and feeds the
//! notification evaluator and dispatcher.

pub mod runner;

pub use runner::{
    Scheduler, SchedulerCommand, SchedulerHandle, SchedulerSettings, SchedulerSnapshot,
    SchedulerState, UserSession,
};
