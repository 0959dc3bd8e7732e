//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod notifier;
pub mod provider;

// Re-export common types
pub use config::ConfigStore;
pub use notifier::{NotificationError, Notifier};
pub use provider::{MessagingProvider, ProviderError, Subscription, SUBSCRIPTION_BUFFER};
