//! Countdown Timer - a drift-corrected countdown with pause, resume and reset
//!
//! This is the main entry point: a terminal front end that reads commands from
//! stdin and prints the countdown to stdout.

use anyhow::anyhow;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use countdown_timer::{
    config::Config,
    tasks::CountdownTimer,
    ui::{handle_command, spawn_stdin_reader, Command, Renderer, Reply, HELP},
    utils::{install_shutdown_signals, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout belongs to the countdown display
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let timer_config = config.timer_config().map_err(|e| anyhow!(e))?;
    info!("Starting countdown-timer v1.0.0");
    info!(
        "Configuration: duration={}s, tick={}ms, clock={:?}",
        timer_config.duration_seconds,
        timer_config.tick_interval.as_millis(),
        config.clock
    );

    let signals = install_shutdown_signals()?;
    let signals_handle = signals.handle();
    let shutdown = shutdown_signal(signals);
    tokio::pin!(shutdown);

    let renderer = Renderer::new(config.json);
    let timer = CountdownTimer::new(timer_config, config.clock());
    let mut display_rx = timer.subscribe_display();
    let mut event_rx = timer.subscribe_events();

    println!("{}", renderer.display(&display_rx.borrow_and_update()).map_err(|e| anyhow!(e))?);
    if config.autostart {
        timer.start();
    }

    let mut lines = spawn_stdin_reader()?;

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line.transpose()? else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match handle_command(&timer, command) {
                    Reply::Done => {}
                    Reply::Status(display) => {
                        println!("{}", renderer.display(&display).map_err(|e| anyhow!(e))?);
                    }
                    Reply::Help => println!("{}", HELP),
                    Reply::Quit => break,
                }
            }

            changed = display_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let display = display_rx.borrow_and_update().clone();
                println!("{}", renderer.display(&display).map_err(|e| anyhow!(e))?);
            }

            event = event_rx.recv() => match event {
                Ok(event) => {
                    if let Some(line) = renderer.event(&event).map_err(|e| anyhow!(e))? {
                        println!("{}", line);
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!("Missed {} timer events", skipped),
                Err(RecvError::Closed) => break,
            },

            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    timer.dispose();
    signals_handle.close();
    info!("Timer shutdown complete");
    Ok(())
}
