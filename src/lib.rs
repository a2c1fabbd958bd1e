//! Countdown Timer - a drift-corrected countdown with pause, resume and reset
//!
//! This library provides the countdown state machine, the single tick task that
//! drives it, and a small terminal front end that renders its notifications.

pub mod config;
pub mod state;
pub mod services;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use services::{Clock, SystemClock, TokioClock};
pub use state::{format_time, TimerDisplay, TimerPhase, TimerState};
pub use tasks::{CountdownTimer, TimerConfig, TimerEvent};
