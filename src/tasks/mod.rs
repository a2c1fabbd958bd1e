//! Background tasks module
//!
//! This module contains the countdown timer and the tick task that drives it.

pub mod countdown;

// Re-export main types
pub use countdown::{CountdownTimer, TimerConfig, TimerEvent, DEFAULT_TICK_INTERVAL};
