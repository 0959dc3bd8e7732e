//! CLI presenter for output formatting

use colored::*;

use crate::application::RelayStats;

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print relay status
    pub fn relay_status(&self, state: &str) {
        eprintln!("{} Relay: {}", "●".cyan(), state);
    }

    /// Format the end-of-run summary
    pub fn format_stats(&self, stats: &RelayStats) -> String {
        format!(
            "{} received, {} displayed, {} failed, {} skipped",
            stats.received, stats.displayed, stats.failed, stats.skipped
        )
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}
