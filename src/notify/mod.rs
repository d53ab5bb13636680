//! Notification evaluation and delivery.

pub mod board;
pub mod dispatcher;
pub mod evaluator;
pub mod event;
pub mod history;
pub mod ledger;
pub mod sink;

pub use board::ReminderBoard;
pub use dispatcher::{Dispatcher, ReminderAck, ToastStyle};
pub use evaluator::{EvaluatorSettings, evaluate};
pub use event::{NotificationEvent, NotificationKind};
pub use history::{DEFAULT_HISTORY_LIMIT, HistoryEntry, NotificationHistory};
pub use ledger::FiredLedger;
pub use sink::{ChannelSink, JsonLinesSink, LogSink, NotificationSink, Toast, ToastVariant};
