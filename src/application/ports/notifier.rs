//! Notification port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::payload::NotificationOptions;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("notify-send not found")]
    NotifySendNotFound,

    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Port for the host notification facility
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Ask the host to present a notification.
    ///
    /// # Arguments
    /// * `title` - The notification title (may be empty)
    /// * `options` - Presentation options, currently only the body
    ///
    /// # Returns
    /// Ok(()) once the host accepted the request. Whether it is actually
    /// rendered (permissions, do-not-disturb) is up to the host.
    async fn show_notification(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<(), NotificationError>;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn show_notification(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<(), NotificationError> {
        self.as_ref().show_notification(title, options).await
    }
}
