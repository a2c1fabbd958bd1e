//! Line input from stdin
//!
//! Reading happens on a dedicated thread so a pending read never holds up
//! runtime shutdown.

use std::{
    io::{self, BufRead},
    thread,
};
use tokio::sync::mpsc;
use tracing::debug;

/// Spawn the reader thread. The channel closes when stdin reaches EOF.
pub fn spawn_stdin_reader() -> io::Result<mpsc::Receiver<io::Result<String>>> {
    let (tx, rx) = mpsc::channel(16);

    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            debug!("stdin reader finished");
        })?;

    Ok(rx)
}
