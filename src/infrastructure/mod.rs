//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the desktop notification server, provider transports
//! and the config file.

pub mod config;
pub mod notification;
pub mod provider;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NotifyRustNotifier, NotifySendNotifier};
pub use provider::{create_provider, StdinProvider, StreamProvider};
#[cfg(unix)]
pub use provider::{SocketPath, SocketProvider, SocketSender};
