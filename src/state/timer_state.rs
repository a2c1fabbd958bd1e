//! Timer state structure and transitions
//!
//! `TimerState` is a pure state machine: every transition takes the current
//! time as milliseconds since the Unix epoch, so it never reads a clock itself.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Result of recomputing the remaining time on a scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down, display should refresh
    Running { remaining_seconds: u64 },
    /// Reached zero on this tick
    Expired,
    /// Timer was not running, nothing changed
    Ignored,
}

/// Countdown state for a single timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    duration_seconds: u64,
    remaining_seconds: u64,
    /// Authoritative while running
    end_timestamp: Option<i64>,
    phase: TimerPhase,
}

impl TimerState {
    /// Create an idle timer with the full duration remaining
    pub fn new(duration_seconds: u64) -> Self {
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            end_timestamp: None,
            phase: TimerPhase::Idle,
        }
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn end_timestamp(&self) -> Option<i64> {
        self.end_timestamp
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Begin or resume counting down.
    ///
    /// Returns `true` when the timer transitioned into `Running`. Starting an
    /// already running timer, or one with nothing left, changes nothing.
    pub fn start(&mut self, now_ms: i64) -> bool {
        if self.is_running() || self.remaining_seconds == 0 {
            return false;
        }

        let remaining_ms = i64::try_from(self.remaining_seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
        self.end_timestamp = Some(now_ms.saturating_add(remaining_ms));
        self.phase = TimerPhase::Running;
        true
    }

    /// Halt the countdown, keeping whatever time is left.
    ///
    /// Returns `true` when the timer transitioned into `Paused`.
    pub fn pause(&mut self, now_ms: i64) -> bool {
        if !self.is_running() {
            return false;
        }

        self.recompute(now_ms);
        self.end_timestamp = None;
        self.phase = if self.remaining_seconds == 0 {
            TimerPhase::Expired
        } else {
            TimerPhase::Paused
        };
        self.phase == TimerPhase::Paused
    }

    /// Return to the initial idle state
    pub fn reset(&mut self) {
        self.remaining_seconds = self.duration_seconds;
        self.end_timestamp = None;
        self.phase = TimerPhase::Idle;
    }

    /// Recompute the remaining time from the end timestamp
    pub fn tick(&mut self, now_ms: i64) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        self.recompute(now_ms);
        if self.remaining_seconds == 0 {
            self.end_timestamp = None;
            self.phase = TimerPhase::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }

    fn recompute(&mut self, now_ms: i64) {
        if let Some(end) = self.end_timestamp {
            self.remaining_seconds = remaining_seconds_until(end, now_ms);
        }
    }
}

/// `max(0, ceil((end - now) / 1000))`
pub fn remaining_seconds_until(end_ms: i64, now_ms: i64) -> u64 {
    let left = end_ms.saturating_sub(now_ms);
    if left <= 0 {
        0
    } else {
        (left as u64).div_ceil(1000)
    }
}
