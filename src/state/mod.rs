//! State management module
//!
//! This module contains the countdown state machine and the display snapshot
//! derived from it.

pub mod display;
pub mod timer_state;

// Re-export main types
pub use display::{format_time, TimerDisplay, WARNING_THRESHOLD_SECONDS};
pub use timer_state::{TickOutcome, TimerPhase, TimerState};
