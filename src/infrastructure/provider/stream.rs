//! Line-stream providers: payloads read from an async reader or from stdin

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::application::ports::{MessagingProvider, ProviderError, Subscription, SUBSCRIPTION_BUFFER};
use crate::domain::config::ProviderConfig;

use super::wire::decode_frame;

/// Provider that reads newline-delimited JSON payloads from a reader until EOF.
///
/// The reader can only be consumed once; a second `connect` fails.
pub struct StreamProvider<R> {
    reader: Mutex<Option<R>>,
}

impl<R> StreamProvider<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    /// Create with a custom reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(Some(reader)),
        }
    }
}

#[async_trait]
impl<R> MessagingProvider for StreamProvider<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    async fn connect(&self, config: &ProviderConfig) -> Result<Subscription, ProviderError> {
        let reader = self
            .reader
            .lock()
            .await
            .take()
            .ok_or(ProviderError::AlreadyConnected)?;

        debug!(project_id = %config.project_id, "Reading payloads from stream");

        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let task = tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut frame = Vec::new();
            loop {
                frame.clear();
                match reader.read_until(b'\n', &mut frame).await {
                    Ok(0) => break,
                    Ok(_) => match decode_frame(&frame) {
                        None => continue,
                        Some(Ok(payload)) => {
                            if tx.send(payload).await.is_err() {
                                break;
                            }
                        }
                        Some(Err(e)) => warn!(error = %e, "Dropping malformed payload line"),
                    },
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        warn!(error = %e, "Payload stream read error");
                        break;
                    }
                }
            }
        });

        Ok(Subscription::with_task(rx, task))
    }
}

/// Provider reading payloads from the process's standard input.
///
/// Reads happen on a detached thread so a relay waiting on an interactive
/// terminal can still exit on a signal.
#[derive(Default)]
pub struct StdinProvider {
    taken: AtomicBool,
}

impl StdinProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagingProvider for StdinProvider {
    async fn connect(&self, config: &ProviderConfig) -> Result<Subscription, ProviderError> {
        if self.taken.swap(true, Ordering::SeqCst) {
            return Err(ProviderError::AlreadyConnected);
        }

        debug!(project_id = %config.project_id, "Reading payloads from stdin");

        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        std::thread::Builder::new()
            .name("stdin-provider".to_string())
            .spawn(move || {
                let mut stdin = std::io::stdin().lock();
                let mut frame = Vec::new();
                loop {
                    frame.clear();
                    match stdin.read_until(b'\n', &mut frame) {
                        Ok(0) => break,
                        Ok(_) => match decode_frame(&frame) {
                            None => continue,
                            Some(Ok(payload)) => {
                                if tx.blocking_send(payload).is_err() {
                                    break;
                                }
                            }
                            Some(Err(e)) => warn!(error = %e, "Dropping malformed payload line"),
                        },
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            warn!(error = %e, "Payload stream read error");
                            break;
                        }
                    }
                }
            })
            .map_err(|e| ProviderError::ReadFailed(e.to_string()))?;

        Ok(Subscription::new(rx))
    }
}
