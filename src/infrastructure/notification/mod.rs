//! Notification infrastructure module
//!
//! Provides cross-platform notification support using notify-rust (primary)
//! or the notify-send tool as fallback.

mod notify_rust;
mod notify_send;

pub use notify_rust::NotifyRustNotifier;
pub use notify_send::NotifySendNotifier;

use crate::application::ports::Notifier;
use crate::domain::config::NotifierKind;

/// Create the notifier selected in configuration
pub fn create_notifier(kind: NotifierKind, app_name: &str, icon: &str) -> Box<dyn Notifier> {
    match kind {
        NotifierKind::NotifyRust => Box::new(NotifyRustNotifier::with_identity(app_name, icon)),
        NotifierKind::NotifySend => Box::new(NotifySendNotifier::with_identity(app_name, icon)),
    }
}
