//! External service module
//!
//! This module contains the time sources the countdown reads "now" from.

pub mod clock;

// Re-export main types
pub use clock::{Clock, SystemClock, TokioClock};
