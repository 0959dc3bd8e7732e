//! Unix Domain Socket provider transport
//!
//! Used on Linux and macOS. The socket name is derived from the provider
//! configuration, so a sender configured for another project never reaches
//! this relay.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::application::ports::{MessagingProvider, ProviderError, Subscription, SUBSCRIPTION_BUFFER};
use crate::domain::config::ProviderConfig;
use crate::domain::payload::PushPayload;

use super::wire::{decode_frame, encode_line};

/// Socket path resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Socket path for a provider record, preferring XDG_RUNTIME_DIR
    pub fn for_config(config: &ProviderConfig) -> Self {
        let dir = std::env::var("XDG_RUNTIME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());
        Self::in_dir(dir, config)
    }

    /// Socket path for a provider record inside a specific directory
    pub fn in_dir(dir: impl AsRef<Path>, config: &ProviderConfig) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("push-relay-{}.sock", config.routing_key())),
        }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Removes the socket file when the accept loop goes away
struct SocketGuard(SocketPath);

impl Drop for SocketGuard {
    fn drop(&mut self) {
        let _ = self.0.cleanup();
    }
}

/// Provider that accepts payloads over a Unix socket.
///
/// Each connection carries newline-delimited JSON payloads; every line is
/// answered with `ok` or `error: <reason>`.
pub struct SocketProvider {
    dir: Option<PathBuf>,
}

impl SocketProvider {
    /// Create a provider using the default runtime directory
    pub fn new() -> Self {
        Self { dir: None }
    }

    /// Create a provider that places its socket in `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Socket path this provider would use for `config`
    pub fn socket_path(&self, config: &ProviderConfig) -> SocketPath {
        match &self.dir {
            Some(dir) => SocketPath::in_dir(dir, config),
            None => SocketPath::for_config(config),
        }
    }
}

impl Default for SocketProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagingProvider for SocketProvider {
    async fn connect(&self, config: &ProviderConfig) -> Result<Subscription, ProviderError> {
        let socket_path = self.socket_path(config);

        // Remove stale socket file if it exists
        socket_path
            .cleanup()
            .map_err(|e| ProviderError::BindFailed(e.to_string()))?;

        let listener = UnixListener::bind(socket_path.path()).map_err(|e| {
            ProviderError::BindFailed(format!("{}: {}", socket_path.path().display(), e))
        })?;
        debug!(socket = %socket_path.path().display(), "Listening for payloads");

        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let guard = SocketGuard(socket_path);
        let task = tokio::spawn(async move {
            let _guard = guard;
            // Dropped with the accept loop, which aborts every open connection
            let mut connections = JoinSet::new();
            loop {
                tokio::select! {
                    accepted = listener.accept() => match accepted {
                        Ok((stream, _addr)) => {
                            let tx = tx.clone();
                            connections.spawn(async move {
                                if let Err(e) = handle_connection(stream, tx).await {
                                    warn!(error = %e, "Socket connection error");
                                }
                            });
                        }
                        Err(e) => {
                            warn!(error = %e, "Socket accept error");
                        }
                    },
                    Some(_) = connections.join_next(), if !connections.is_empty() => {}
                }
            }
        });

        Ok(Subscription::with_task(rx, task))
    }
}

/// Handle a single sender connection
async fn handle_connection(stream: UnixStream, tx: mpsc::Sender<PushPayload>) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut frame = Vec::new();

    loop {
        frame.clear();
        if reader.read_until(b'\n', &mut frame).await? == 0 {
            break;
        }

        let response = match decode_frame(&frame) {
            None => continue,
            Some(Ok(payload)) => {
                if tx.send(payload).await.is_err() {
                    "error: relay is shutting down\n".to_string()
                } else {
                    "ok\n".to_string()
                }
            }
            Some(Err(e)) => {
                warn!(error = %e, "Dropping malformed payload line");
                format!("error: invalid payload: {}\n", e)
            }
        };

        writer.write_all(response.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Sender side of the socket transport
pub struct SocketSender {
    socket_path: SocketPath,
}

impl SocketSender {
    /// Create a new sender
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }

    /// Check if a relay appears to be listening (socket exists)
    pub fn is_relay_running(&self) -> bool {
        self.socket_path.exists()
    }

    /// Send one payload and return the relay's response line
    pub async fn send(&self, payload: &PushPayload) -> io::Result<String> {
        let line = encode_line(payload).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response.trim().to_string())
    }
}
