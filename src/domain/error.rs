//! Domain error types

use thiserror::Error;

/// Error when an unknown notifier backend is requested
#[derive(Debug, Clone, Error)]
#[error("Invalid notifier: \"{input}\". Valid notifiers are: notify-rust, notify-send")]
pub struct InvalidNotifierError {
    pub input: String,
}

/// Error when an unknown provider transport is requested
#[derive(Debug, Clone, Error)]
#[error("Invalid transport: \"{input}\". Valid transports are: socket, stdin")]
pub struct InvalidTransportError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Missing required provider setting '{0}'. Set it with 'push-relay config set {0} <value>'")]
    MissingProviderField(String),

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
