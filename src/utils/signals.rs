//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::info;

/// Register for the signals that end the session (SIGTERM, SIGINT, SIGHUP)
pub fn install_shutdown_signals() -> std::io::Result<Signals> {
    Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGHUP,
    ])
}

/// Wait for the first shutdown signal, `None` if the stream was closed
pub async fn shutdown_signal(mut signals: Signals) -> Option<i32> {
    let signal = signals.next().await;
    if let Some(signal) = signal {
        info!("Received signal: {}", signal);
    }
    signal
}
