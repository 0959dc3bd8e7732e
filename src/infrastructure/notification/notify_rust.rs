//! Cross-platform notification adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux.

use async_trait::async_trait;

use crate::application::ports::{NotificationError, Notifier};
use crate::domain::config::{DEFAULT_APP_NAME, DEFAULT_ICON};
use crate::domain::payload::NotificationOptions;

/// Cross-platform notifier using notify-rust
pub struct NotifyRustNotifier {
    app_name: String,
    icon: String,
}

impl NotifyRustNotifier {
    /// Create a new notify-rust notifier
    pub fn new() -> Self {
        Self::with_identity(DEFAULT_APP_NAME, DEFAULT_ICON)
    }

    /// Create with custom app name and icon
    pub fn with_identity(app_name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            icon: icon.into(),
        }
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn show_notification(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<(), NotificationError> {
        let title = title.to_owned();
        let body = options.body.clone();
        let app_name = self.app_name.clone();
        let icon = self.icon.clone();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut notification = notify_rust::Notification::new();
            notification.appname(&app_name).summary(&title).icon(&icon);
            if let Some(body) = body.as_deref() {
                notification.body(body);
            }

            notification
                .show()
                .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

            Ok(())
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_with_custom_identity() {
        let notifier = NotifyRustNotifier::with_identity("Shop", "mail-unread");
        assert_eq!(notifier.app_name, "Shop");
        assert_eq!(notifier.icon, "mail-unread");
    }

    #[test]
    fn notifier_default_identity() {
        let notifier = NotifyRustNotifier::default();
        assert_eq!(notifier.app_name, "Push Relay");
        assert_eq!(notifier.icon, "dialog-information");
    }
}
