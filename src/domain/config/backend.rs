//! Notifier and transport selectors

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{InvalidNotifierError, InvalidTransportError};

/// Desktop notification backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotifierKind {
    #[default]
    NotifyRust,
    NotifySend,
}

impl NotifierKind {
    /// Get the string identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotifyRust => "notify-rust",
            Self::NotifySend => "notify-send",
        }
    }
}

impl FromStr for NotifierKind {
    type Err = InvalidNotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notify-rust" => Ok(Self::NotifyRust),
            "notify-send" => Ok(Self::NotifySend),
            _ => Err(InvalidNotifierError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How payloads reach the relay from the provider side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportKind {
    #[default]
    Socket,
    Stdin,
}

impl TransportKind {
    /// Get the string identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Socket => "socket",
            Self::Stdin => "stdin",
        }
    }
}

impl FromStr for TransportKind {
    type Err = InvalidTransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "socket" => Ok(Self::Socket),
            "stdin" => Ok(Self::Stdin),
            _ => Err(InvalidTransportError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
