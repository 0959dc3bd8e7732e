//! Messaging provider transports
//!
//! - Unix (Linux/macOS): Unix Domain Socket listener
//! - Everywhere: newline-delimited JSON on standard input

#[cfg(unix)]
mod socket;
mod stream;
mod wire;

#[cfg(unix)]
pub use socket::{SocketPath, SocketProvider, SocketSender};
pub use stream::{StdinProvider, StreamProvider};
pub use wire::{decode_frame, decode_line, encode_line, FrameError};

use crate::application::ports::{MessagingProvider, ProviderError};
use crate::domain::config::TransportKind;

/// Create the provider transport selected in configuration
pub fn create_provider(kind: TransportKind) -> Result<Box<dyn MessagingProvider>, ProviderError> {
    match kind {
        #[cfg(unix)]
        TransportKind::Socket => Ok(Box::new(SocketProvider::new())),
        #[cfg(not(unix))]
        TransportKind::Socket => Err(ProviderError::BindFailed(
            "socket transport is only available on Unix".to_string(),
        )),
        TransportKind::Stdin => Ok(Box::new(StdinProvider::new())),
    }
}
