//! Messaging provider port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::config::ProviderConfig;
use crate::domain::payload::PushPayload;

/// Buffer size for subscription channels
pub const SUBSCRIPTION_BUFFER: usize = 32;

/// Provider connection errors
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Failed to bind provider endpoint: {0}")]
    BindFailed(String),

    #[error("Failed to read from provider: {0}")]
    ReadFailed(String),

    #[error("Provider is already connected")]
    AlreadyConnected,
}

/// Stream of payloads for one active provider connection.
///
/// Dropping the subscription stops the background task feeding it.
pub struct Subscription {
    receiver: mpsc::Receiver<PushPayload>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wrap a receiver that is fed by someone else
    pub fn new(receiver: mpsc::Receiver<PushPayload>) -> Self {
        Self {
            receiver,
            task: None,
        }
    }

    /// Wrap a receiver together with the task that feeds it
    pub fn with_task(receiver: mpsc::Receiver<PushPayload>, task: JoinHandle<()>) -> Self {
        Self {
            receiver,
            task: Some(task),
        }
    }

    /// Wait for the next payload. `None` once the provider side has closed.
    pub async fn recv(&mut self) -> Option<PushPayload> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Port for the external push-messaging provider
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Connect to the provider project described by `config` and start
    /// receiving payloads.
    ///
    /// # Arguments
    /// * `config` - Static identity/routing record
    ///
    /// # Returns
    /// A subscription yielding payloads in arrival order
    async fn connect(&self, config: &ProviderConfig) -> Result<Subscription, ProviderError>;
}

/// Blanket implementation for boxed provider types
#[async_trait]
impl MessagingProvider for Box<dyn MessagingProvider> {
    async fn connect(&self, config: &ProviderConfig) -> Result<Subscription, ProviderError> {
        self.as_ref().connect(config).await
    }
}
