//! Shutdown signal handling.

use tokio::signal::unix::{Signal, SignalKind, signal};

/// Waits for the first of SIGINT (Ctrl+C) or SIGTERM.
///
/// The SIGTERM handler is registered in [`Shutdown::install`], so a SIGTERM
/// delivered between install and [`Shutdown::wait`] is not lost.
#[derive(Debug)]
pub struct Shutdown {
    terminate: Signal,
}

impl Shutdown {
    /// Register the SIGTERM handler. Must be called inside a tokio runtime.
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Resolve once a shutdown signal arrives and return its name.
    pub async fn wait(&mut self) -> &'static str {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                    // Fall back to SIGTERM only
                    self.terminate.recv().await;
                    return "SIGTERM";
                }
                "SIGINT"
            }
            _ = self.terminate.recv() => "SIGTERM",
        }
    }
}
