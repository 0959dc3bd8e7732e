//! Push payload domain module

mod displayed;
mod push_payload;

pub use displayed::{DisplayedNotification, NotificationOptions};
pub use push_payload::{NotificationContent, PushPayload};
