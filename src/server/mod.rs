// Server module entry point
// Provides the accept loop, per-connection handling, and graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_reusable_listener;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;
use connection::accept_connection;
use signal::SignalHandler;

/// Run the accept loop until shutdown is requested.
///
/// On shutdown the listener is dropped so no new connections are accepted,
/// then in-flight connections are given a bounded grace period to finish.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        if signals.shutdown_requested.load(Ordering::SeqCst) {
            logger::log_shutdown_requested();
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                logger::log_shutdown_requested();
                break;
            }
        }
    }

    // Release the port before draining so restarts can rebind immediately
    drop(listener);

    drain_connections(&active_connections, state.config.performance.shutdown_grace).await;
    logger::log_shutdown_complete();
    Ok(())
}

/// Wait for in-flight connections to finish, up to `grace_secs`.
///
/// Completion is best effort; a hanging subprocess or idle keep-alive
/// connection must not keep the process alive past the deadline.
async fn drain_connections(active_connections: &Arc<AtomicUsize>, grace_secs: u64) {
    let active = active_connections.load(Ordering::SeqCst);
    if active == 0 {
        return;
    }

    logger::log_shutdown_draining(active, grace_secs);
    let deadline = tokio::time::Instant::now() + Duration::from_secs(grace_secs);

    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {} connection(s) still open",
                active_connections.load(Ordering::SeqCst)
            ));
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
