//! Configuration and CLI argument handling

use std::{sync::Arc, time::Duration};
use clap::{Parser, ValueEnum};

use crate::{
    services::{Clock, SystemClock, TokioClock},
    tasks::TimerConfig,
};

/// Shortest tick period accepted on the command line
pub const MIN_TICK_MS: u64 = 10;

/// Where the timer reads the current time from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockKind {
    /// Wall clock, follows system time changes
    System,
    /// Monotonic clock anchored at startup
    Monotonic,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "countdown-timer")]
#[command(about = "A drift-corrected countdown timer with pause, resume and reset")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Countdown length in seconds
    #[arg(short, long, default_value = "600")]
    pub duration: u64,

    /// Nominal tick period in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Time source for the countdown
    #[arg(long, value_enum, default_value = "system")]
    pub clock: ClockKind,

    /// Start counting down immediately
    #[arg(long)]
    pub autostart: bool,

    /// Print display updates and events as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Validate the arguments and build the timer configuration
    pub fn timer_config(&self) -> Result<TimerConfig, String> {
        if self.duration == 0 {
            return Err("Duration must be at least 1 second".to_string());
        }
        if self.tick_ms < MIN_TICK_MS {
            return Err(format!(
                "Tick period must be at least {}ms, got {}ms",
                MIN_TICK_MS, self.tick_ms
            ));
        }

        Ok(TimerConfig::new(self.duration).with_tick_interval(Duration::from_millis(self.tick_ms)))
    }

    /// Build the configured time source
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.clock {
            ClockKind::System => Arc::new(SystemClock),
            ClockKind::Monotonic => Arc::new(TokioClock::new()),
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("countdown-timer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_ten_minutes() {
        let config = parse(&[]);
        assert_eq!(config.clock, ClockKind::System);
        assert!(!config.autostart);
        assert!(!config.json);
        assert_eq!(config.log_level(), "info");

        let timer = config.timer_config().unwrap();
        assert_eq!(timer.duration_seconds, 600);
        assert_eq!(timer.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn parses_all_flags() {
        let config = parse(&["-d", "90", "--tick-ms", "250", "--clock", "monotonic", "--autostart", "--json", "-v"]);
        assert_eq!(config.clock, ClockKind::Monotonic);
        assert!(config.autostart);
        assert!(config.json);
        assert_eq!(config.log_level(), "debug");

        let timer = config.timer_config().unwrap();
        assert_eq!(timer.duration_seconds, 90);
        assert_eq!(timer.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn rejects_zero_duration() {
        let err = parse(&["--duration", "0"]).timer_config().unwrap_err();
        assert!(err.contains("Duration"));
    }

    #[test]
    fn rejects_tiny_tick_period() {
        let err = parse(&["--tick-ms", "5"]).timer_config().unwrap_err();
        assert!(err.contains("5ms"));
    }

    #[test]
    fn rejects_unknown_clock() {
        assert!(Config::try_parse_from(["countdown-timer", "--clock", "sundial"]).is_err());
    }
}
