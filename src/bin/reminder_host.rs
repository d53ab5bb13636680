//! Headless reminder host.
//!
//! Loads the TOML config, activates the configured user and writes every
//! toast to stdout as one line of JSON.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON channel.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use edu_reminders::notify::JsonLinesSink;
use edu_reminders::{
    HttpTaskSource, ReminderConfig, Scheduler, SchedulerSettings, SystemClock, logging,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(ReminderConfig::default_config_path);

    let config = if path.exists() {
        ReminderConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?
    } else {
        ReminderConfig::default()
    };
    config.validate().context("invalid configuration")?;

    let _log_guard = logging::init_logging(&config.logging).context("failed to initialise logging")?;
    tracing::info!(config = %path.display(), "reminder-host starting");

    let source = HttpTaskSource::new(&config.api).context("failed to build task API client")?;
    let sink = JsonLinesSink::new(std::io::stdout());
    let scheduler = Scheduler::new(
        Arc::new(source),
        Arc::new(sink),
        Arc::new(SystemClock),
        SchedulerSettings::from_config(&config),
    );

    let user = config.session.user();
    if user.is_none() {
        tracing::warn!("no session.user_id configured; scheduler stays idle");
    }
    let (_session_tx, session_rx) = watch::channel(user);

    let cancel = CancellationToken::new();
    let handle = scheduler.spawn(session_rx, cancel.clone());

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    tracing::info!("shutdown requested");

    handle.shutdown().await.map_err(|e| {
        tracing::error!(error = %e, "reminder-host exited with error");
        anyhow::anyhow!("reminder-host failed: {e}")
    })?;

    tracing::info!("reminder-host shut down cleanly");
    Ok(())
}
