//! Push Relay CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use push_relay::cli::{
    app::{config_store, load_merged_config, run_relay, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    send_cmd::handle_send_command,
    presenter::Presenter,
    RelayOptions,
};
use push_relay::domain::config::{AppConfig, NotifierKind, RelaySection, TransportKind};

/// Default log filter when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "push_relay=info";

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();
    let store = config_store(cli.config.as_deref());

    // Config subcommands work on the raw file, not the merged view
    let command = match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        other => other,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        provider: None,
        relay: Some(RelaySection {
            app_name: cli.app_name.clone(),
            icon: cli.icon.clone(),
            notifier: cli.notifier.map(|n| NotifierKind::from(n).to_string()),
            transport: cli.transport.map(|t| TransportKind::from(t).to_string()),
        }),
    };

    let config = match load_merged_config(&store, cli_config).await {
        Ok(c) => c,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let provider_config = match config.provider_config() {
        Ok(p) => p,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    if let Some(Commands::Send(args)) = command {
        if let Err(e) = handle_send_command(args, &provider_config, &presenter).await {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let options = RelayOptions {
        transport: config.transport_or_default(),
        notifier: config.notifier_or_default(),
        app_name: config.app_name_or_default().to_string(),
        icon: config.icon_or_default().to_string(),
    };

    run_relay(options, provider_config).await
}
