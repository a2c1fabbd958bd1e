//! Display snapshot handed to whatever renders the timer

use serde::Serialize;

use super::{TimerPhase, TimerState};

/// Below this many seconds the display switches to its warning style
pub const WARNING_THRESHOLD_SECONDS: u64 = 60;

/// Everything a renderer needs to draw the timer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerDisplay {
    pub remaining_seconds: u64,
    pub running: bool,
    /// Progress bar fill, `100 * remaining / duration`
    pub percentage_elapsed: f64,
    pub phase: TimerPhase,
    pub warning: bool,
    pub formatted: String,
    pub duration_seconds: u64,
}

impl TimerDisplay {
    /// Build a snapshot of the current timer state
    pub fn from_state(state: &TimerState) -> Self {
        let remaining = state.remaining_seconds();
        Self {
            remaining_seconds: remaining,
            running: state.is_running(),
            percentage_elapsed: percentage(remaining, state.duration_seconds()),
            phase: state.phase(),
            warning: remaining < WARNING_THRESHOLD_SECONDS,
            formatted: format_time(remaining),
            duration_seconds: state.duration_seconds(),
        }
    }
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn percentage(remaining: u64, duration: u64) -> f64 {
    if duration == 0 {
        return 0.0;
    }
    (remaining as f64 / duration as f64 * 100.0).clamp(0.0, 100.0)
}
