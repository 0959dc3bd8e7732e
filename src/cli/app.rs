//! Relay runner and config loading

use std::env;
use std::path::Path;
use std::process::ExitCode;

use tracing::info;

use crate::application::ports::ConfigStore;
use crate::application::NotificationRelay;
use crate::domain::config::{AppConfig, ProviderConfig, ProviderSection};
use crate::infrastructure::{create_notifier, create_provider, XdgConfigStore};

use super::args::RelayOptions;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variables that override provider settings
pub const ENV_API_KEY: &str = "PUSH_RELAY_API_KEY";
pub const ENV_PROJECT_ID: &str = "PUSH_RELAY_PROJECT_ID";
pub const ENV_APP_ID: &str = "PUSH_RELAY_APP_ID";
pub const ENV_MESSAGING_SENDER_ID: &str = "PUSH_RELAY_MESSAGING_SENDER_ID";

/// Run the relay until the provider closes or a shutdown signal arrives
pub async fn run_relay(options: RelayOptions, provider_config: ProviderConfig) -> ExitCode {
    let presenter = Presenter::new();

    #[cfg(unix)]
    let pid_file = {
        use super::pid_file::{PidFile, PidFileError};

        let pid_file = PidFile::for_config(&provider_config);
        if let Err(e) = pid_file.acquire() {
            match e {
                PidFileError::AlreadyRunning(pid) => presenter.error(&format!(
                    "Another relay is already running for project '{}' (PID: {})",
                    provider_config.project_id, pid
                )),
                _ => presenter.error(&e.to_string()),
            }
            return ExitCode::from(EXIT_ERROR);
        }
        pid_file
    };

    let shutdown = match ShutdownSignal::install() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Create adapters
    let provider = match create_provider(options.transport) {
        Ok(p) => p,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let notifier = create_notifier(options.notifier, &options.app_name, &options.icon);

    let project_id = provider_config.project_id.clone();
    let relay = NotificationRelay::new(provider, notifier, provider_config);

    if let Err(e) = relay.activate().await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.relay_status(&format!(
        "Active for project '{}', waiting for messages...",
        project_id
    ));
    presenter.info(&format!(
        "PID: {} | Transport: {} | Notifier: {} | SIGINT: exit",
        std::process::id(),
        options.transport,
        options.notifier
    ));

    let result = relay.run(shutdown.recv()).await;

    #[cfg(unix)]
    let _ = pid_file.release();

    match result {
        Ok(stats) => {
            info!(?stats, "Relay stopped");
            presenter.relay_status(&format!("Stopped ({})", presenter.format_stats(&stats)));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Config store for an explicit path, or the XDG default
pub fn config_store(path: Option<&Path>) -> XdgConfigStore {
    match path {
        Some(p) => XdgConfigStore::with_path(p),
        None => XdgConfigStore::new(),
    }
}

/// Provider overrides from the environment
pub fn env_config() -> AppConfig {
    env_config_from(|key| env::var(key).ok())
}

/// Provider overrides from an arbitrary variable lookup. Empty values are ignored.
pub fn env_config_from<F>(lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|s| !s.is_empty());

    let section = ProviderSection {
        api_key: get(ENV_API_KEY),
        project_id: get(ENV_PROJECT_ID),
        app_id: get(ENV_APP_ID),
        messaging_sender_id: get(ENV_MESSAGING_SENDER_ID),
        ..Default::default()
    };

    AppConfig {
        provider: (section != ProviderSection::default()).then_some(section),
        relay: None,
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, crate::domain::error::ConfigError> {
    let file_config = store.load().await?;

    // Merge: defaults < file < env < cli
    Ok(AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config))
}
