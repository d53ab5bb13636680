//! The UI notification sink.
//!
//! The rest of the application renders toasts; this module only describes
//! them. A [`NotificationSink`] receives fully styled [`Toast`]s.

use crate::error::{ReminderError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    /// Informational styling.
    #[default]
    Default,
    /// Error styling.
    Destructive,
}

/// A transient on-screen notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    /// How long the toast stays on screen.
    pub duration_ms: u64,
}

/// Accepts toasts for presentation.
pub trait NotificationSink: Send + Sync {
    /// Present `toast`.
    fn show(&self, toast: &Toast) -> Result<()>;
}

/// Forwards toasts to a channel consumed by the embedding UI.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Toast>,
}

impl ChannelSink {
    /// Create a sink and the receiving end the UI should drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn show(&self, toast: &Toast) -> Result<()> {
        self.tx
            .send(toast.clone())
            .map_err(|_| ReminderError::Sink("toast receiver dropped".to_owned()))
    }
}

/// Writes toasts to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn show(&self, toast: &Toast) -> Result<()> {
        match toast.variant {
            ToastVariant::Default => info!(title = %toast.title, "{}", toast.description),
            ToastVariant::Destructive => warn!(title = %toast.title, "{}", toast.description),
        }
        Ok(())
    }
}

/// Writes each toast as one line of JSON.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> NotificationSink for JsonLinesSink<W> {
    fn show(&self, toast: &Toast) -> Result<()> {
        let line = serde_json::to_string(toast).map_err(|e| ReminderError::Sink(e.to_string()))?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ReminderError::Sink("writer lock poisoned".to_owned()))?;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}
