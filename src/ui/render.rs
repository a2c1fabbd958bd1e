//! Text and JSON rendering of timer output

use crate::{
    state::{TimerDisplay, TimerPhase},
    tasks::TimerEvent,
};

/// Cells in the text progress bar
pub const BAR_WIDTH: usize = 20;

pub const EXPIRED_BANNER: &str = "*** Time's up! Type 'reset' to start over. ***";

/// Turns display snapshots and events into output lines
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    json: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn display(&self, display: &TimerDisplay) -> Result<String, String> {
        if self.json {
            return serde_json::to_string(display)
                .map_err(|e| format!("Failed to serialize display: {}", e));
        }

        Ok(format!(
            "{} [{}] {:>5.1}% {}{}",
            display.formatted,
            progress_bar(display.percentage_elapsed),
            display.percentage_elapsed,
            phase_label(display.phase),
            if display.warning { " !" } else { "" },
        ))
    }

    /// Returns `None` when the event has no text form
    pub fn event(&self, event: &TimerEvent) -> Result<Option<String>, String> {
        if self.json {
            return serde_json::to_string(event)
                .map(Some)
                .map_err(|e| format!("Failed to serialize event: {}", e));
        }

        Ok(match event {
            TimerEvent::Expired { .. } => Some(EXPIRED_BANNER.to_string()),
            TimerEvent::Dismissed => None,
        })
    }
}

fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn phase_label(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Idle => "ready",
        TimerPhase::Running => "running",
        TimerPhase::Paused => "paused",
        TimerPhase::Expired => "expired",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::state::TimerState;

    #[test]
    fn renders_text_line() {
        let line = Renderer::new(false)
            .display(&TimerDisplay::from_state(&TimerState::new(600)))
            .unwrap();
        assert_eq!(line, "10:00 [####################] 100.0% ready");
    }

    #[test]
    fn marks_warning_and_shrinks_bar() {
        let mut state = TimerState::new(100);
        state.start(0);
        state.tick(55_000);

        let line = Renderer::new(false).display(&TimerDisplay::from_state(&state)).unwrap();
        assert_eq!(line, "00:45 [#########-----------]  45.0% running !");
    }

    #[test]
    fn renders_json_lines() {
        let renderer = Renderer::new(true);
        let line = renderer.display(&TimerDisplay::from_state(&TimerState::new(65))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["formatted"], "01:05");
        assert_eq!(value["running"], false);

        let at = Utc.timestamp_millis_opt(0).unwrap();
        let event = renderer.event(&TimerEvent::Expired { at }).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&event).unwrap();
        assert_eq!(value["event"], "expired");

        let dismissed = renderer.event(&TimerEvent::Dismissed).unwrap().unwrap();
        assert_eq!(dismissed, r#"{"event":"dismissed"}"#);
    }

    #[test]
    fn text_mode_shows_banner_only_on_expiry() {
        let renderer = Renderer::new(false);
        let at = Utc.timestamp_millis_opt(0).unwrap();
        assert_eq!(
            renderer.event(&TimerEvent::Expired { at }).unwrap().as_deref(),
            Some(EXPIRED_BANNER)
        );
        assert_eq!(renderer.event(&TimerEvent::Dismissed).unwrap(), None);
    }
}
