//! Displayed notification value object

use super::PushPayload;

/// Presentation options passed to the host notification facility
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationOptions {
    pub body: Option<String>,
}

/// A notification handed to the host notification system.
///
/// Once presented it belongs to the host; dismissal is outside the relay's
/// control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedNotification {
    pub title: String,
    pub options: NotificationOptions,
}

impl DisplayedNotification {
    /// Build the notification for a payload.
    ///
    /// Returns `None` when the payload has no `notification` block at all.
    /// A missing title degrades to an empty string, a missing body stays `None`.
    pub fn from_payload(payload: &PushPayload) -> Option<Self> {
        let content = payload.notification.as_ref()?;

        Some(Self {
            title: content.title.clone().unwrap_or_default(),
            options: NotificationOptions {
                body: content.body.clone(),
            },
        })
    }
}
