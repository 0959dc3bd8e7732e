//! Notification relay use case

use std::future::Future;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::config::ProviderConfig;
use crate::domain::payload::{DisplayedNotification, PushPayload};
use crate::domain::relay::{InvalidStateTransition, RelaySession, RelayState};

use super::ports::{MessagingProvider, Notifier, ProviderError, Subscription};

/// Errors from the relay use case
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Provider connection failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    InvalidState(#[from] InvalidStateTransition),

    #[error("No provider subscription available: the relay loop is running or the stream has closed")]
    SubscriptionUnavailable,
}

/// What happened to a single payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The host accepted the display request
    Displayed,
    /// The host refused or failed the request; nothing else is done about it
    PresentationFailed,
    /// The payload had no notification block
    Skipped,
}

/// Counters for one run of the relay loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub received: u64,
    pub displayed: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl RelayStats {
    fn record(&mut self, outcome: DeliveryOutcome) {
        self.received += 1;
        match outcome {
            DeliveryOutcome::Displayed => self.displayed += 1,
            DeliveryOutcome::PresentationFailed => self.failed += 1,
            DeliveryOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Bridges a messaging provider to the host notification facility.
///
/// One instance per process. Payloads are handled one at a time, each to
/// completion, in arrival order.
pub struct NotificationRelay<P, N>
where
    P: MessagingProvider,
    N: Notifier,
{
    provider: P,
    notifier: N,
    config: ProviderConfig,
    session: Mutex<RelaySession>,
    subscription: Mutex<Option<Subscription>>,
}

impl<P, N> NotificationRelay<P, N>
where
    P: MessagingProvider,
    N: Notifier,
{
    /// Create a new relay in the inactive state
    pub fn new(provider: P, notifier: N, config: ProviderConfig) -> Self {
        Self {
            provider,
            notifier,
            config,
            session: Mutex::new(RelaySession::new()),
            subscription: Mutex::new(None),
        }
    }

    /// Get current relay state
    pub async fn state(&self) -> RelayState {
        self.session.lock().await.state()
    }

    /// Connect to the provider and move INACTIVE -> ACTIVE.
    ///
    /// On a failed connection the relay stays inactive.
    pub async fn activate(&self) -> Result<(), RelayError> {
        let mut session = self.session.lock().await;
        session.ensure_inactive()?;

        debug!(config = ?self.config, "Connecting to messaging provider");
        let subscription = self.provider.connect(&self.config).await?;

        session.activate()?;
        *self.subscription.lock().await = Some(subscription);

        info!(project_id = %self.config.project_id, "Relay active");
        Ok(())
    }

    /// Handle one inbound payload: log it, then request exactly one
    /// notification from the host.
    ///
    /// Missing title or body are passed through as empty/absent. A payload
    /// without a notification block is skipped. Presentation failures are
    /// logged and swallowed.
    pub async fn on_background_message(
        &self,
        payload: PushPayload,
    ) -> Result<DeliveryOutcome, RelayError> {
        self.session.lock().await.ensure_active()?;

        let raw = payload
            .to_json()
            .unwrap_or_else(|_| format!("{:?}", payload));
        info!(payload = %raw, "Background message received");

        let Some(notification) = DisplayedNotification::from_payload(&payload) else {
            warn!("Payload has no notification block, nothing to display");
            return Ok(DeliveryOutcome::Skipped);
        };

        match self
            .notifier
            .show_notification(&notification.title, &notification.options)
            .await
        {
            Ok(()) => {
                debug!(title = %notification.title, "Notification presented");
                Ok(DeliveryOutcome::Displayed)
            }
            Err(e) => {
                warn!(error = %e, title = %notification.title, "Host did not present notification");
                Ok(DeliveryOutcome::PresentationFailed)
            }
        }
    }

    /// Consume payloads until the provider closes or `shutdown` resolves.
    ///
    /// Shutdown is only observed between payloads.
    pub async fn run<F>(&self, shutdown: F) -> Result<RelayStats, RelayError>
    where
        F: Future<Output = ()>,
    {
        self.session.lock().await.ensure_active()?;

        let mut subscription = self
            .subscription
            .lock()
            .await
            .take()
            .ok_or(RelayError::SubscriptionUnavailable)?;

        tokio::pin!(shutdown);
        let mut stats = RelayStats::default();
        let mut closed = false;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, leaving relay loop");
                    break;
                }
                next = subscription.recv() => match next {
                    Some(payload) => {
                        let outcome = self.on_background_message(payload).await?;
                        stats.record(outcome);
                    }
                    None => {
                        info!("Provider stream closed");
                        closed = true;
                        break;
                    }
                },
            }
        }

        if !closed {
            *self.subscription.lock().await = Some(subscription);
        }

        Ok(stats)
    }
}
