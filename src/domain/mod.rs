//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod payload;
pub mod relay;

// Re-export common types
pub use config::{AppConfig, NotifierKind, ProviderConfig, TransportKind};
pub use error::*;
pub use payload::{DisplayedNotification, NotificationOptions, PushPayload};
pub use relay::{RelaySession, RelayState};
