//! Countdown timer and its background tick task

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    services::Clock,
    state::{TickOutcome, TimerDisplay, TimerPhase, TimerState},
};

/// Nominal period between scheduled ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Fixed configuration of a countdown, set at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub duration_seconds: u64,
    pub tick_interval: Duration,
}

impl TimerConfig {
    pub fn new(duration_seconds: u64) -> Self {
        Self {
            duration_seconds,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

/// Notifications that are not plain display refreshes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TimerEvent {
    /// Remaining time reached zero, fired once per run
    Expired { at: DateTime<Utc> },
    /// A reset cleared an expired timer, any expiry notice should go away
    Dismissed,
}

#[derive(Debug)]
struct Inner {
    state: TimerState,
    tick_task: Option<JoinHandle<()>>,
    /// Bumped on every cancellation, a tick task only acts while its generation is current
    generation: u64,
    disposed: bool,
}

impl Inner {
    fn cancel_tick_task(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.tick_task.take() {
            handle.abort();
            debug!("Cancelled tick task");
        }
    }
}

#[derive(Debug)]
struct Shared {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    display_tx: watch::Sender<TimerDisplay>,
    event_tx: broadcast::Sender<TimerEvent>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Timer state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Notify display watchers, skipping updates that would not change anything
    fn publish(&self, state: &TimerState) {
        let next = TimerDisplay::from_state(state);
        self.display_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn emit(&self, event: TimerEvent) {
        if let Err(e) = self.event_tx.send(event) {
            debug!("No listeners for timer event: {}", e);
        }
    }

    fn expired_event(&self, now_ms: i64) -> TimerEvent {
        TimerEvent::Expired {
            at: DateTime::from_timestamp_millis(now_ms).unwrap_or_else(Utc::now),
        }
    }

    /// Handle one scheduled tick. Returns `false` once the task should stop.
    fn on_tick(&self, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation || inner.disposed {
            debug!("Stale tick task exiting");
            return false;
        }

        let now = self.clock.now_millis();
        match inner.state.tick(now) {
            TickOutcome::Running { remaining_seconds } => {
                debug!("Tick: {}s remaining", remaining_seconds);
                self.publish(&inner.state);
                true
            }
            TickOutcome::Expired => {
                info!("Countdown expired");
                // Detach our own handle, the loop ends right after this.
                inner.tick_task = None;
                inner.generation = inner.generation.wrapping_add(1);
                self.publish(&inner.state);
                self.emit(self.expired_event(now));
                false
            }
            TickOutcome::Ignored => false,
        }
    }
}

/// Drift-corrected countdown with at most one live tick task.
///
/// Display snapshots are published on a `watch` channel and expiry/dismissal
/// on a `broadcast` channel. All commands are silent no-ops when they do not
/// apply. `start` spawns onto the current Tokio runtime.
#[derive(Debug)]
pub struct CountdownTimer {
    shared: Arc<Shared>,
    tick_interval: Duration,
}

impl CountdownTimer {
    pub fn new(config: TimerConfig, clock: Arc<dyn Clock>) -> Self {
        let state = TimerState::new(config.duration_seconds);
        let (display_tx, _) = watch::channel(TimerDisplay::from_state(&state));
        let (event_tx, _) = broadcast::channel(16);

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state,
                    tick_task: None,
                    generation: 0,
                    disposed: false,
                }),
                clock,
                display_tx,
                event_tx,
            }),
            // `interval_at` rejects a zero period
            tick_interval: config.tick_interval.max(Duration::from_millis(1)),
        }
    }

    /// Begin or resume counting down
    pub fn start(&self) {
        let mut inner = self.shared.lock();
        self.start_locked(&mut inner);
    }

    /// Halt counting down, keeping the remaining time
    pub fn pause(&self) {
        let mut inner = self.shared.lock();
        self.pause_locked(&mut inner);
    }

    /// Start when not running, pause when running
    pub fn toggle(&self) {
        let mut inner = self.shared.lock();
        if inner.state.is_running() {
            self.pause_locked(&mut inner);
        } else {
            self.start_locked(&mut inner);
        }
    }

    /// Return to the initial state and cancel all pending work
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }

        inner.cancel_tick_task();
        let was_expired = inner.state.phase() == TimerPhase::Expired;
        inner.state.reset();
        info!("Timer reset to {}s", inner.state.duration_seconds());

        self.shared.publish(&inner.state);
        if was_expired {
            self.shared.emit(TimerEvent::Dismissed);
        }
    }

    /// Cancel any tick task and go inert. Must be called on teardown.
    pub fn dispose(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }

        inner.cancel_tick_task();
        let now = self.shared.clock.now_millis();
        inner.state.pause(now);
        inner.disposed = true;
        info!("Timer disposed with {}s remaining", inner.state.remaining_seconds());
    }

    fn start_locked(&self, inner: &mut Inner) {
        if inner.disposed {
            debug!("Start ignored, timer disposed");
            return;
        }

        let now = self.shared.clock.now_millis();
        if !inner.state.start(now) {
            debug!(
                "Start ignored in {:?} phase with {}s remaining",
                inner.state.phase(),
                inner.state.remaining_seconds()
            );
            return;
        }

        inner.cancel_tick_task();
        let generation = inner.generation;
        inner.tick_task = Some(tokio::spawn(tick_task(
            Arc::clone(&self.shared),
            generation,
            self.tick_interval,
        )));
        info!("Timer started with {}s remaining", inner.state.remaining_seconds());

        self.shared.publish(&inner.state);
    }

    fn pause_locked(&self, inner: &mut Inner) {
        if inner.disposed || !inner.state.is_running() {
            debug!("Pause ignored, timer not running");
            return;
        }

        inner.cancel_tick_task();
        let now = self.shared.clock.now_millis();
        inner.state.pause(now);
        self.shared.publish(&inner.state);

        if inner.state.phase() == TimerPhase::Expired {
            info!("Countdown expired while pausing");
            self.shared.emit(self.shared.expired_event(now));
        } else {
            info!("Timer paused with {}s remaining", inner.state.remaining_seconds());
        }
    }

    /// Current display snapshot
    pub fn snapshot(&self) -> TimerDisplay {
        TimerDisplay::from_state(&self.shared.lock().state)
    }

    pub fn phase(&self) -> TimerPhase {
        self.shared.lock().state.phase()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.shared.lock().state.remaining_seconds()
    }

    pub fn duration_seconds(&self) -> u64 {
        self.shared.lock().state.duration_seconds()
    }

    pub fn end_timestamp(&self) -> Option<i64> {
        self.shared.lock().state.end_timestamp()
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().state.is_running()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    /// Whether a tick task is currently scheduled
    pub fn has_tick_task(&self) -> bool {
        self.shared
            .lock()
            .tick_task
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn subscribe_display(&self) -> watch::Receiver<TimerDisplay> {
        self.shared.display_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.shared.event_tx.subscribe()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.shared.lock().cancel_tick_task();
    }
}

/// Recurring tick, recomputes remaining time until expiry or cancellation
async fn tick_task(shared: Arc<Shared>, generation: u64, period: Duration) {
    let mut interval = interval_at(Instant::now() + period, period);
    // Late ticks are coalesced, the next one recomputes from the end timestamp anyway.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if !shared.on_tick(generation) {
            break;
        }
    }
}
