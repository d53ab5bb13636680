//! Reminder scheduler background loop.
//!
//! One tokio task owns all scheduler state. It is `Idle` until a user
//! session appears on the session channel, then `Active`: a task load starts
//! immediately and the list is evaluated as soon as it lands, after which two
//! timers drive periodic evaluation and a coarser periodic refetch. Loads run
//! on their own tasks and report back tagged with the session generation, so
//! the loop never waits on the network. Losing or switching the user tears
//! the session down, aborting any pending load and discarding its cache,
//! de-dup ledger, reminder board and any results still in flight.

use crate::clock::Clock;
use crate::config::ReminderConfig;
use crate::error::{ReminderError, Result};
use crate::notify::dispatcher::{Dispatcher, ReminderAck, ToastStyle};
use crate::notify::evaluator::{EvaluatorSettings, evaluate};
use crate::notify::event::NotificationEvent;
use crate::notify::history::{DEFAULT_HISTORY_LIMIT, HistoryEntry};
use crate::notify::ledger::FiredLedger;
use crate::notify::sink::NotificationSink;
use crate::tasks::model::Task;
use crate::tasks::source::{TaskSource, TaskWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Shortest timer period accepted.
const MIN_PERIOD: Duration = Duration::from_secs(1);

/// The signed-in user the scheduler works for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    /// No user; no timers.
    #[default]
    Idle,
    /// A user is present and timers are running.
    Active,
}

/// Public snapshot used by UI tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchedulerSnapshot {
    pub state: SchedulerState,
    pub user: Option<UserSession>,
    /// Incremented on every activation.
    pub generation: u64,
    /// Tasks currently cached for evaluation.
    pub cached_tasks: usize,
    /// Reminder banners not yet dismissed.
    pub active_reminders: Vec<NotificationEvent>,
    /// Dispatched notifications, newest first.
    pub history: Vec<HistoryEntry>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub last_refresh_error: Option<String>,
}

/// Requests from the UI to a running scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerCommand {
    /// Dismiss one reminder banner by event id.
    Dismiss(String),
    /// Dismiss every reminder banner.
    DismissAll,
    /// Start a refetch now; the list is evaluated when it lands.
    RefreshNow,
}

/// Cadences and notification tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub evaluation_interval: Duration,
    pub refresh_interval: Duration,
    /// Days after today included in each load.
    pub window_days: u32,
    pub evaluator: EvaluatorSettings,
    pub toast_style: ToastStyle,
    pub history_limit: usize,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            evaluation_interval: Duration::from_secs(60),
            refresh_interval: Duration::from_secs(300),
            window_days: 7,
            evaluator: EvaluatorSettings::default(),
            toast_style: ToastStyle::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl SchedulerSettings {
    /// Settings described by `config`.
    pub fn from_config(config: &ReminderConfig) -> Self {
        Self {
            evaluation_interval: config.schedule.evaluation_interval(),
            refresh_interval: config.schedule.refresh_interval(),
            window_days: config.schedule.window_days,
            evaluator: config.evaluator_settings(),
            toast_style: config.notifications.toast_style(),
            history_limit: config.notifications.history_limit,
        }
    }
}

/// Background scheduler that turns task deadlines into notifications.
pub struct Scheduler {
    source: Arc<dyn TaskSource>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    settings: SchedulerSettings,
}

impl Scheduler {
    /// Create a scheduler; nothing runs until [`Scheduler::spawn`].
    pub fn new(
        source: Arc<dyn TaskSource>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            source,
            sink,
            clock,
            settings,
        }
    }

    /// Start the background loop.
    ///
    /// The loop follows `sessions` until `cancel` fires or the session
    /// sender is dropped.
    pub fn spawn(
        self,
        sessions: watch::Receiver<Option<UserSession>>,
        cancel: CancellationToken,
    ) -> SchedulerHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SchedulerSnapshot::default());
        let (ack_tx, ack_rx) = mpsc::unbounded_channel();
        let (load_tx, load_rx) = mpsc::unbounded_channel();

        let runner = Runner::new(self, ack_tx, load_tx, snapshot_tx);
        let join = tokio::spawn(runner.run(
            sessions,
            command_rx,
            ack_rx,
            load_rx,
            cancel.clone(),
        ));

        SchedulerHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            cancel,
            join,
        }
    }
}

/// Control surface of a spawned scheduler.
pub struct SchedulerHandle {
    commands: mpsc::UnboundedSender<SchedulerCommand>,
    snapshots: watch::Receiver<SchedulerSnapshot>,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Dismiss one reminder banner.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Scheduler`] when the loop has stopped.
    pub fn dismiss(&self, event_id: impl Into<String>) -> Result<()> {
        self.send(SchedulerCommand::Dismiss(event_id.into()))
    }

    /// Dismiss every reminder banner.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Scheduler`] when the loop has stopped.
    pub fn dismiss_all(&self) -> Result<()> {
        self.send(SchedulerCommand::DismissAll)
    }

    /// Refetch and evaluate without waiting for the timers.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Scheduler`] when the loop has stopped.
    pub fn refresh_now(&self) -> Result<()> {
        self.send(SchedulerCommand::RefreshNow)
    }

    fn send(&self, command: SchedulerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| ReminderError::Scheduler("scheduler is not running".to_owned()))
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SchedulerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<SchedulerSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the loop and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Scheduler`] if the loop task panicked.
    pub async fn shutdown(self) -> Result<()> {
        self.cancel.cancel();
        self.join
            .await
            .map_err(|e| ReminderError::Scheduler(format!("scheduler task failed: {e}")))
    }
}

/// State owned while a user is present.
struct ActiveSession {
    user: UserSession,
    tasks: Vec<Task>,
    ledger: FiredLedger,
    dispatcher: Dispatcher,
    last_refresh: Option<DateTime<Utc>>,
    last_refresh_error: Option<String>,
    load: Option<JoinHandle<()>>,
}

/// Outcome of a background task load.
struct TaskLoad {
    generation: u64,
    window: TaskWindow,
    requested_at: DateTime<Utc>,
    result: Result<Vec<Task>>,
}

struct Runner {
    source: Arc<dyn TaskSource>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    settings: SchedulerSettings,
    generation: u64,
    active: Option<ActiveSession>,
    ack_tx: mpsc::UnboundedSender<ReminderAck>,
    load_tx: mpsc::UnboundedSender<TaskLoad>,
    snapshots: watch::Sender<SchedulerSnapshot>,
}

impl Runner {
    fn new(
        scheduler: Scheduler,
        ack_tx: mpsc::UnboundedSender<ReminderAck>,
        load_tx: mpsc::UnboundedSender<TaskLoad>,
        snapshots: watch::Sender<SchedulerSnapshot>,
    ) -> Self {
        Self {
            source: scheduler.source,
            sink: scheduler.sink,
            clock: scheduler.clock,
            settings: scheduler.settings,
            generation: 0,
            active: None,
            ack_tx,
            load_tx,
            snapshots,
        }
    }

    async fn run(
        mut self,
        mut sessions: watch::Receiver<Option<UserSession>>,
        mut commands: mpsc::UnboundedReceiver<SchedulerCommand>,
        mut acks: mpsc::UnboundedReceiver<ReminderAck>,
        mut loads: mpsc::UnboundedReceiver<TaskLoad>,
        cancel: CancellationToken,
    ) {
        info!("reminder scheduler started");
        let mut evaluate_timer: Option<Interval> = None;
        let mut refresh_timer: Option<Interval> = None;

        let initial = sessions.borrow_and_update().clone();
        if self.apply_session(initial) {
            evaluate_timer = self.timer(self.settings.evaluation_interval);
            refresh_timer = self.timer(self.settings.refresh_interval);
        }
        self.publish();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("reminder scheduler cancelled");
                    break;
                }
                changed = sessions.changed() => {
                    if changed.is_err() {
                        debug!("session channel closed, stopping reminder scheduler");
                        break;
                    }
                    let next = sessions.borrow_and_update().clone();
                    if self.apply_session(next) {
                        evaluate_timer = self.timer(self.settings.evaluation_interval);
                        refresh_timer = self.timer(self.settings.refresh_interval);
                    }
                }
                _ = next_tick(&mut evaluate_timer) => self.evaluate_now(),
                _ = next_tick(&mut refresh_timer) => self.start_refresh(),
                Some(load) = loads.recv() => self.apply_load(load),
                Some(ack) = acks.recv() => self.apply_ack(ack),
                Some(command) = commands.recv() => self.handle_command(command),
            }
            self.publish();
        }

        self.deactivate();
        self.publish();
        info!("reminder scheduler stopped");
    }

    /// Apply a session change. Returns `true` when the timers must be
    /// rebuilt (activation, switch or deactivation).
    fn apply_session(&mut self, next: Option<UserSession>) -> bool {
        let current = self.active.as_ref().map(|a| a.user.id.clone());
        match (current, next) {
            (None, None) => false,
            (Some(current), Some(user)) if current == user.id => {
                if let Some(active) = self.active.as_mut() {
                    active.user = user;
                }
                false
            }
            (Some(_), None) => {
                self.deactivate();
                true
            }
            (_, Some(user)) => {
                self.deactivate();
                self.activate(user);
                true
            }
        }
    }

    fn activate(&mut self, user: UserSession) {
        self.generation += 1;
        info!(user_id = %user.id, generation = self.generation, "reminder session activated");

        let dispatcher = Dispatcher::new(
            Arc::clone(&self.sink),
            Arc::clone(&self.source),
            self.settings.toast_style,
            self.generation,
            self.ack_tx.clone(),
            self.settings.history_limit,
        );
        self.active = Some(ActiveSession {
            user,
            tasks: Vec::new(),
            ledger: FiredLedger::new(),
            dispatcher,
            last_refresh: None,
            last_refresh_error: None,
            load: None,
        });
        self.start_refresh();
    }

    fn deactivate(&mut self) {
        if let Some(active) = self.active.take() {
            if let Some(load) = &active.load {
                load.abort();
            }
            info!(
                user_id = %active.user.id,
                generation = self.generation,
                fired = active.ledger.len(),
                "reminder session ended"
            );
        }
    }

    fn timer(&self, period: Duration) -> Option<Interval> {
        self.active.as_ref()?;
        let period = period.max(MIN_PERIOD);
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Some(interval)
    }

    /// Start a background task load unless one is already pending.
    fn start_refresh(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.load.as_ref().is_some_and(|load| !load.is_finished()) {
            debug!(user_id = %active.user.id, "task load already pending");
            return;
        }

        let requested_at = self.clock.now();
        let today = self.settings.evaluator.zone.date_of(requested_at);
        let window = TaskWindow::starting(today, self.settings.window_days);
        let source = Arc::clone(&self.source);
        let loads = self.load_tx.clone();
        let user_id = active.user.id.clone();
        let generation = self.generation;

        active.load = Some(tokio::spawn(async move {
            let result = source.load_tasks(&user_id, window).await;
            let load = TaskLoad {
                generation,
                window,
                requested_at,
                result,
            };
            if loads.send(load).is_err() {
                debug!(%user_id, "scheduler stopped before task load finished");
            }
        }));
    }

    /// Apply a finished load and evaluate the new list. A failed load keeps
    /// the cached list; loads from an ended session are dropped.
    fn apply_load(&mut self, load: TaskLoad) {
        let generation = self.generation;
        let Some(active) = self
            .active
            .as_mut()
            .filter(|_| load.generation == generation)
        else {
            debug!(
                generation = load.generation,
                "discarding task load from an ended session"
            );
            return;
        };
        active.load = None;

        match load.result {
            Ok(tasks) => {
                debug!(
                    user_id = %active.user.id,
                    count = tasks.len(),
                    start = %load.window.start,
                    end = %load.window.end,
                    "task list refreshed"
                );
                active.tasks = tasks;
                active.last_refresh = Some(load.requested_at);
                active.last_refresh_error = None;
            }
            Err(e) => {
                warn!(user_id = %active.user.id, error = %e, "task refresh failed, keeping cached list");
                active.last_refresh_error = Some(e.to_string());
                return;
            }
        }
        self.evaluate_now();
    }

    fn evaluate_now(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let events = evaluate(
            &active.tasks,
            self.clock.now(),
            &mut active.ledger,
            &self.settings.evaluator,
        );
        for event in events {
            active.dispatcher.dispatch(event, &active.user.id);
        }
    }

    fn apply_ack(&mut self, ack: ReminderAck) {
        match self.active.as_mut() {
            Some(active) if active.dispatcher.generation() == ack.generation => {
                if let Some(task) = active.tasks.iter_mut().find(|t| t.id == ack.task_id) {
                    task.mark_reminder_sent();
                }
            }
            _ => {
                debug!(
                    task_id = %ack.task_id,
                    generation = ack.generation,
                    "discarding reminder ack from an ended session"
                );
            }
        }
    }

    fn handle_command(&mut self, command: SchedulerCommand) {
        match command {
            SchedulerCommand::Dismiss(event_id) => {
                let dismissed = self
                    .active
                    .as_mut()
                    .is_some_and(|active| active.dispatcher.dismiss(&event_id));
                if !dismissed {
                    debug!(%event_id, "no active reminder to dismiss");
                }
            }
            SchedulerCommand::DismissAll => {
                if let Some(active) = self.active.as_mut() {
                    let count = active.dispatcher.dismiss_all();
                    debug!(count, "reminders dismissed");
                }
            }
            SchedulerCommand::RefreshNow => self.start_refresh(),
        }
    }

    fn snapshot(&self) -> SchedulerSnapshot {
        let Some(active) = self.active.as_ref() else {
            return SchedulerSnapshot {
                generation: self.generation,
                ..SchedulerSnapshot::default()
            };
        };
        SchedulerSnapshot {
            state: SchedulerState::Active,
            user: Some(active.user.clone()),
            generation: self.generation,
            cached_tasks: active.tasks.len(),
            active_reminders: active
                .dispatcher
                .board()
                .active()
                .into_iter()
                .cloned()
                .collect(),
            history: active.dispatcher.history().recent(self.clock.now()),
            last_refresh: active.last_refresh,
            last_refresh_error: active.last_refresh_error.clone(),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

/// Wait for the next tick, or forever when there is no timer.
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::clock::{LocalZone, ManualClock};
    use crate::notify::sink::{ChannelSink, Toast};
    use crate::tasks::mock_source::MockTaskSource;
    use crate::tasks::model::TaskKind;
    use chrono::{NaiveDate, TimeZone};

    struct Fixture {
        runner: Runner,
        source: Arc<MockTaskSource>,
        clock: Arc<ManualClock>,
        toasts: mpsc::UnboundedReceiver<Toast>,
        loads: mpsc::UnboundedReceiver<TaskLoad>,
        _acks: mpsc::UnboundedReceiver<ReminderAck>,
    }

    impl Fixture {
        fn sign_in(&mut self, user_id: &str) -> bool {
            self.runner.apply_session(Some(UserSession::new(user_id)))
        }

        /// Wait for the pending load and hand it to the runner.
        async fn settle(&mut self) {
            let load = self.loads.recv().await.expect("task load result");
            self.runner.apply_load(load);
        }
    }

    fn essay() -> Task {
        Task::new(
            "t-1",
            "Essay",
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap(),
            "10:00 AM".parse().unwrap(),
            TaskKind::Assignment,
        )
        .with_reminder(60)
    }

    fn fixture() -> Fixture {
        let source = Arc::new(MockTaskSource::new(vec![essay()]));
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 1, 16, 9, 15, 0).unwrap(),
        ));
        let (sink, toasts) = ChannelSink::new();
        let settings = SchedulerSettings {
            evaluator: EvaluatorSettings {
                zone: LocalZone::Utc,
                ..EvaluatorSettings::default()
            },
            ..SchedulerSettings::default()
        };
        let scheduler = Scheduler::new(source.clone(), Arc::new(sink), clock.clone(), settings);
        let (ack_tx, acks) = mpsc::unbounded_channel();
        let (load_tx, loads) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(SchedulerSnapshot::default());
        Fixture {
            runner: Runner::new(scheduler, ack_tx, load_tx, snapshot_tx),
            source,
            clock,
            toasts,
            loads,
            _acks: acks,
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Toast>) -> Vec<Toast> {
        let mut out = Vec::new();
        while let Ok(toast) = rx.try_recv() {
            out.push(toast);
        }
        out
    }

    #[tokio::test]
    async fn activation_publishes_then_evaluates_when_the_load_lands() {
        let mut f = fixture();
        assert!(f.sign_in("teacher-1"));

        let snapshot = f.runner.snapshot();
        assert_eq!(snapshot.state, SchedulerState::Active);
        assert_eq!(snapshot.cached_tasks, 0);
        assert!(drain(&mut f.toasts).is_empty());

        f.settle().await;
        assert_eq!(f.source.load_calls(), 1);
        let toasts = drain(&mut f.toasts);
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].description, "\"Essay\" is due in 60 minutes");

        let snapshot = f.runner.snapshot();
        assert_eq!(snapshot.cached_tasks, 1);
        assert_eq!(snapshot.active_reminders.len(), 1);
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.last_refresh.is_some());
    }

    #[tokio::test]
    async fn same_user_is_not_reactivated() {
        let mut f = fixture();
        f.sign_in("teacher-1");
        f.settle().await;
        let renamed = UserSession::new("teacher-1").with_name("Ms. Rivera");
        assert!(!f.runner.apply_session(Some(renamed)));
        assert_eq!(f.source.load_calls(), 1);
        assert_eq!(
            f.runner.snapshot().user.unwrap().name.as_deref(),
            Some("Ms. Rivera")
        );
    }

    #[tokio::test]
    async fn deactivation_discards_session_state() {
        let mut f = fixture();
        f.sign_in("teacher-1");
        f.settle().await;
        assert!(f.runner.apply_session(None));

        let snapshot = f.runner.snapshot();
        assert_eq!(snapshot.state, SchedulerState::Idle);
        assert!(snapshot.active_reminders.is_empty());
        assert!(snapshot.history.is_empty());
        assert!(f.runner.timer(Duration::from_secs(60)).is_none());
    }

    #[tokio::test]
    async fn user_switch_starts_a_fresh_ledger() {
        let mut f = fixture();
        f.sign_in("teacher-1");
        f.settle().await;
        drain(&mut f.toasts);

        assert!(f.sign_in("teacher-2"));
        assert_eq!(f.runner.snapshot().generation, 2);
        f.settle().await;
        assert_eq!(drain(&mut f.toasts).len(), 2, "new session re-evaluates from scratch");
    }

    #[tokio::test]
    async fn stale_acks_are_discarded() {
        let mut f = fixture();
        f.sign_in("teacher-1");
        f.settle().await;
        f.sign_in("teacher-2");
        f.settle().await;

        f.runner.apply_ack(ReminderAck {
            generation: 1,
            task_id: "t-1".into(),
        });
        let active = f.runner.active.as_ref().unwrap();
        assert!(!active.tasks[0].reminder.reminder_sent);

        f.runner.apply_ack(ReminderAck {
            generation: 2,
            task_id: "t-1".into(),
        });
        let active = f.runner.active.as_ref().unwrap();
        assert!(active.tasks[0].reminder.reminder_sent);
    }

    #[tokio::test]
    async fn loads_from_an_ended_session_are_discarded() {
        let mut f = fixture();
        f.sign_in("teacher-1");
        f.settle().await;
        f.sign_in("teacher-2");
        f.settle().await;
        drain(&mut f.toasts);

        let today = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        f.runner.apply_load(TaskLoad {
            generation: 1,
            window: TaskWindow::starting(today, 7),
            requested_at: f.clock.now(),
            result: Ok(Vec::new()),
        });

        let snapshot = f.runner.snapshot();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.cached_tasks, 1);
        assert!(drain(&mut f.toasts).is_empty());
    }

    #[tokio::test]
    async fn pending_load_is_not_doubled() {
        let mut f = fixture();
        f.sign_in("teacher-1");
        f.runner.start_refresh();
        f.settle().await;

        tokio::task::yield_now().await;
        assert!(f.loads.try_recv().is_err());
        assert_eq!(f.source.load_calls(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_cache() {
        let mut f = fixture();
        f.sign_in("teacher-1");
        f.settle().await;
        f.source.fail_loads(true);
        f.runner.start_refresh();
        f.settle().await;

        let snapshot = f.runner.snapshot();
        assert_eq!(snapshot.cached_tasks, 1);
        assert!(snapshot.last_refresh_error.unwrap().contains("mock load failure"));

        f.clock.set(Utc.with_ymd_and_hms(2025, 1, 16, 11, 0, 0).unwrap());
        drain(&mut f.toasts);
        f.runner.evaluate_now();
        let toasts = drain(&mut f.toasts);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Task overdue");
    }

    #[tokio::test]
    async fn dismiss_commands_update_board() {
        let mut f = fixture();
        f.sign_in("teacher-1");
        f.settle().await;
        let event_id = f.runner.snapshot().active_reminders[0].id.clone();

        f.runner.handle_command(SchedulerCommand::Dismiss(event_id));
        assert!(f.runner.snapshot().active_reminders.is_empty());
        assert_eq!(f.runner.snapshot().history.len(), 2);
    }

    #[test]
    fn settings_follow_config() {
        let mut config = ReminderConfig::default();
        config.schedule.evaluation_interval_secs = 30;
        config.notifications.history_limit = 5;
        let settings = SchedulerSettings::from_config(&config);
        assert_eq!(settings.evaluation_interval, Duration::from_secs(30));
        assert_eq!(settings.refresh_interval, Duration::from_secs(300));
        assert_eq!(settings.history_limit, 5);
    }
}
