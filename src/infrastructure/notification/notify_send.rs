//! notify-send notification adapter

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{NotificationError, Notifier};
use crate::domain::config::{DEFAULT_APP_NAME, DEFAULT_ICON};
use crate::domain::payload::NotificationOptions;

/// notify-send notification adapter
pub struct NotifySendNotifier {
    app_name: String,
    icon: String,
}

impl NotifySendNotifier {
    /// Create a new notify-send notifier
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

    /// Command-line arguments for one notification
    fn args(&self, title: &str, options: &NotificationOptions) -> Vec<String> {
        let mut args = vec![
            "--app-name".to_string(),
            self.app_name.clone(),
            "--icon".to_string(),
            self.icon.clone(),
            // Keeps a leading '-' in the title from being read as a flag
            "--".to_string(),
            title.to_string(),
        ];
        if let Some(body) = &options.body {
            args.push(body.clone());
        }
        args
    }
}

impl Default for NotifySendNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifySendNotifier {
    async fn show_notification(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<(), NotificationError> {
        let status = Command::new("notify-send")
            .args(self.args(title, options))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotificationError::NotifySendNotFound
                } else {
                    NotificationError::SendFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(NotificationError::SendFailed(format!(
                "notify-send exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}
