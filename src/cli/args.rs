//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::{NotifierKind, TransportKind};

/// Push Relay - turn push-provider messages into desktop notifications
#[derive(Parser, Debug)]
#[command(name = "push-relay")]
#[command(version)]
#[command(about = "Background relay that shows push-provider messages as desktop notifications")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file to use instead of the XDG default
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// How payloads reach the relay
    #[arg(short = 't', long, value_name = "TRANSPORT")]
    pub transport: Option<TransportArg>,

    /// Desktop notification backend
    #[arg(short = 'n', long, value_name = "NOTIFIER")]
    pub notifier: Option<NotifierArg>,

    /// Application name shown with each notification
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Icon name or path shown with each notification
    #[arg(long, value_name = "ICON")]
    pub icon: Option<String>,

    /// Subcommand (runs the relay when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Deliver a payload to a running relay
    Send(SendArgs),
}

/// Arguments for the send subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SendArgs {
    /// Notification title
    #[arg(long, value_name = "TITLE", conflicts_with = "json")]
    pub title: Option<String>,

    /// Notification body
    #[arg(long, value_name = "BODY", conflicts_with = "json")]
    pub body: Option<String>,

    /// Opaque metadata entry (repeatable)
    #[arg(long = "data", value_name = "KEY=VALUE", value_parser = parse_key_val, conflicts_with = "json")]
    pub data: Vec<(String, String)>,

    /// Raw payload JSON, sent as-is
    #[arg(long, value_name = "JSON")]
    pub json: Option<String>,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Transport argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    Socket,
    Stdin,
}

impl From<TransportArg> for TransportKind {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Socket => TransportKind::Socket,
            TransportArg::Stdin => TransportKind::Stdin,
        }
    }
}

/// Notifier argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NotifierArg {
    NotifyRust,
    NotifySend,
}

impl From<NotifierArg> for NotifierKind {
    fn from(arg: NotifierArg) -> Self {
        match arg {
            NotifierArg::NotifyRust => NotifierKind::NotifyRust,
            NotifierArg::NotifySend => NotifierKind::NotifySend,
        }
    }
}

/// Parsed relay options
#[derive(Debug, Clone)]
pub struct RelayOptions {
    pub transport: TransportKind,
    pub notifier: NotifierKind,
    pub app_name: String,
    pub icon: String,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "provider.api_key",
    "provider.auth_domain",
    "provider.project_id",
    "provider.storage_bucket",
    "provider.messaging_sender_id",
    "provider.app_id",
    "provider.measurement_id",
    "relay.app_name",
    "relay.icon",
    "relay.notifier",
    "relay.transport",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

/// Parse a `KEY=VALUE` pair
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["push-relay"]);
        assert!(cli.config.is_none());
        assert!(cli.transport.is_none());
        assert!(cli.notifier.is_none());
        assert!(cli.app_name.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_relay_flags() {
        let cli = Cli::parse_from([
            "push-relay",
            "-t",
            "stdin",
            "-n",
            "notify-send",
            "--app-name",
            "Shop",
            "--icon",
            "mail-unread",
        ]);
        assert_eq!(cli.transport, Some(TransportArg::Stdin));
        assert_eq!(cli.notifier, Some(NotifierArg::NotifySend));
        assert_eq!(cli.app_name, Some("Shop".to_string()));
        assert_eq!(cli.icon, Some("mail-unread".to_string()));
    }

    #[test]
    fn cli_parses_global_config_path() {
        let cli = Cli::parse_from(["push-relay", "config", "list", "--config", "/tmp/c.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["push-relay", "config", "set", "provider.project_id", "demo"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "provider.project_id");
            assert_eq!(value, "demo");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_send() {
        let cli = Cli::parse_from([
            "push-relay",
            "send",
            "--title",
            "Order shipped",
            "--body",
            "Your order #123 is on its way",
            "--data",
            "order=123",
            "--data",
            "kind=shipping",
        ]);
        let Some(Commands::Send(args)) = cli.command else {
            panic!("Expected Send command");
        };
        assert_eq!(args.title.as_deref(), Some("Order shipped"));
        assert_eq!(args.body.as_deref(), Some("Your order #123 is on its way"));
        assert_eq!(
            args.data,
            vec![
                ("order".to_string(), "123".to_string()),
                ("kind".to_string(), "shipping".to_string())
            ]
        );
    }

    #[test]
    fn send_json_conflicts_with_title() {
        let result = Cli::try_parse_from(["push-relay", "send", "--json", "{}", "--title", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_key_val_rules() {
        assert_eq!(
            parse_key_val("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn arg_conversions() {
        assert_eq!(TransportKind::from(TransportArg::Socket), TransportKind::Socket);
        assert_eq!(NotifierKind::from(NotifierArg::NotifyRust), NotifierKind::NotifyRust);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("provider.api_key"));
        assert!(is_valid_config_key("relay.transport"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
