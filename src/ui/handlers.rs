//! Command handlers wiring user input to the timer

use tracing::debug;

use crate::{state::TimerDisplay, tasks::CountdownTimer};
use super::commands::Command;

/// What the front end should do after a command ran
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Nothing extra, display updates arrive on their own
    Done,
    Status(TimerDisplay),
    Help,
    Quit,
}

/// Run a command against the timer
pub fn handle_command(timer: &CountdownTimer, command: Command) -> Reply {
    debug!("Handling command: {:?}", command);

    match command {
        Command::Start => {
            timer.start();
            Reply::Done
        }
        Command::Pause => {
            timer.pause();
            Reply::Done
        }
        Command::Toggle => {
            timer.toggle();
            Reply::Done
        }
        Command::Reset => {
            timer.reset();
            Reply::Done
        }
        Command::Status => Reply::Status(timer.snapshot()),
        Command::Help => Reply::Help,
        Command::Quit => Reply::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::{services::TokioClock, state::TimerPhase, tasks::TimerConfig};

    fn timer() -> CountdownTimer {
        CountdownTimer::new(TimerConfig::new(120), Arc::new(TokioClock::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn commands_drive_the_timer() {
        let timer = timer();

        assert_eq!(handle_command(&timer, Command::Start), Reply::Done);
        assert_eq!(timer.phase(), TimerPhase::Running);

        assert_eq!(handle_command(&timer, Command::Toggle), Reply::Done);
        assert_eq!(timer.phase(), TimerPhase::Paused);

        handle_command(&timer, Command::Toggle);
        handle_command(&timer, Command::Pause);
        assert_eq!(timer.phase(), TimerPhase::Paused);

        handle_command(&timer, Command::Reset);
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn status_help_and_quit_leave_timer_alone() {
        let timer = timer();

        match handle_command(&timer, Command::Status) {
            Reply::Status(display) => assert_eq!(display.formatted, "02:00"),
            other => panic!("unexpected reply {:?}", other),
        }
        assert_eq!(handle_command(&timer, Command::Help), Reply::Help);
        assert_eq!(handle_command(&timer, Command::Quit), Reply::Quit);
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }
}
