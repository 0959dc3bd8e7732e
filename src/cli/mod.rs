//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the relay runner.

pub mod app;
pub mod args;
pub mod config_cmd;
#[cfg(unix)]
pub mod pid_file;
pub mod presenter;
pub mod send_cmd;
pub mod signals;

// Re-export commonly used types
pub use app::{run_relay, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, RelayOptions, SendArgs};
pub use presenter::Presenter;
pub use send_cmd::handle_send_command;
