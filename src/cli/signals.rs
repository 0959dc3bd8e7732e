//! Shutdown signal handling for the relay loop

use std::fmt;

use tokio::sync::mpsc;
use tracing::info;

/// Why the relay is shutting down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT / Ctrl+C
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "SIGINT"),
            Self::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Listens for OS shutdown signals.
///
/// Handlers are installed on construction so a signal arriving before
/// [`ShutdownSignal::recv`] is awaited is not lost.
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<ShutdownReason>,
}

impl ShutdownSignal {
    /// Install SIGINT and SIGTERM handlers
    #[cfg(unix)]
    pub fn install() -> Result<Self, std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let (tx, rx) = mpsc::channel(2);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            let _ = tx_int.send(ShutdownReason::Interrupt).await;
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            let _ = tx.send(ShutdownReason::Terminate).await;
        });

        Ok(Self { receiver: rx })
    }

    /// Install a Ctrl+C handler
    #[cfg(not(unix))]
    pub fn install() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(ShutdownReason::Interrupt).await;
            }
        });
        Ok(Self { receiver: rx })
    }

    /// Wait for the first shutdown signal
    pub async fn recv(mut self) {
        if let Some(reason) = self.receiver.recv().await {
            info!(signal = %reason, "Received shutdown signal");
        }
    }
}
