//! Terminal front end module
//!
//! This module contains the command parsing, handlers and rendering that let a
//! terminal drive the countdown.

pub mod commands;
pub mod handlers;
pub mod input;
pub mod render;

pub use commands::{Command, HELP};
pub use handlers::{handle_command, Reply};
pub use input::spawn_stdin_reader;
pub use render::Renderer;
