//! Application layer - Use cases and port interfaces
//!
//! Contains the relay use case and the trait definitions
//! for external system interactions.

pub mod ports;
pub mod relay;

// Re-export use cases
pub use relay::{DeliveryOutcome, NotificationRelay, RelayError, RelayStats};
