// Signal handling module
//
// Supported signals:
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGTERM: Graceful shutdown

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Signal handler state, owned by the entry point and shared with the
/// server loop via `Arc` rather than module-level globals.
pub struct SignalHandler {
    /// Notified once when shutdown is requested
    pub shutdown: Arc<Notify>,
    /// Whether shutdown has been requested
    pub shutdown_requested: Arc<AtomicBool>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark shutdown as requested and wake the server loop.
    ///
    /// `notify_one` stores a permit, so a signal that arrives before the
    /// loop is parked on `notified()` is not lost.
    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        self.shutdown.notify_one();
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the signal listener task (Unix).
///
/// SIGINT and SIGTERM both trigger graceful shutdown; there is no other
/// termination path.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigint.recv() => {
                println!("\n[SIGNAL] SIGINT received (Ctrl+C), initiating graceful shutdown");
            }
            _ = sigterm.recv() => {
                println!("\n[SIGNAL] SIGTERM received, initiating graceful shutdown");
            }
        }

        handler.request_shutdown();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[SIGNAL] Ctrl+C received, initiating graceful shutdown");
            handler.request_shutdown();
        }
    });
}
