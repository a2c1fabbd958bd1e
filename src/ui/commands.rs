//! Commands typed at the terminal

use std::str::FromStr;

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  start  | s      start or resume the countdown
  pause  | p      pause the countdown
  toggle | t      start when paused, pause when running
  reset  | r      back to the full duration
  status          show the current time left
  help   | h | ?  show this help
  quit   | q      stop and exit";

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "start" | "s" => Ok(Self::Start),
            "pause" | "p" => Ok(Self::Pause),
            "toggle" | "t" => Ok(Self::Toggle),
            "reset" | "r" => Ok(Self::Reset),
            "status" => Ok(Self::Status),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            "" => Err("Empty command".to_string()),
            other => Err(format!("Unknown command '{}', type 'help' for a list", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("start".parse(), Ok(Command::Start));
        assert_eq!("s".parse(), Ok(Command::Start));
        assert_eq!("P".parse(), Ok(Command::Pause));
        assert_eq!(" toggle ".parse(), Ok(Command::Toggle));
        assert_eq!("r".parse(), Ok(Command::Reset));
        assert_eq!("STATUS".parse(), Ok(Command::Status));
        assert_eq!("?".parse(), Ok(Command::Help));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_unknown_input() {
        let err = "launch".parse::<Command>().unwrap_err();
        assert!(err.contains("launch"));
        assert!("   ".parse::<Command>().is_err());
    }
}
