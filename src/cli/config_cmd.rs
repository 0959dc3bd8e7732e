//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, NotifierKind, ProviderSection, RelaySection, TransportKind};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value);
    store.save(&config).await?;

    let shown = if key == "provider.api_key" {
        mask_api_key(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    presenter.output(&display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    Ok(())
}

/// Read a key for display; the API key is masked
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    let provider = config.provider.as_ref();
    let relay = config.relay.as_ref();

    match key {
        "provider.api_key" => provider
            .and_then(|p| p.api_key.as_deref())
            .map(mask_api_key),
        "provider.auth_domain" => provider.and_then(|p| p.auth_domain.clone()),
        "provider.project_id" => provider.and_then(|p| p.project_id.clone()),
        "provider.storage_bucket" => provider.and_then(|p| p.storage_bucket.clone()),
        "provider.messaging_sender_id" => provider.and_then(|p| p.messaging_sender_id.clone()),
        "provider.app_id" => provider.and_then(|p| p.app_id.clone()),
        "provider.measurement_id" => provider.and_then(|p| p.measurement_id.clone()),
        "relay.app_name" => relay.and_then(|r| r.app_name.clone()),
        "relay.icon" => relay.and_then(|r| r.icon.clone()),
        "relay.notifier" => relay.and_then(|r| r.notifier.clone()),
        "relay.transport" => relay.and_then(|r| r.transport.clone()),
        _ => None,
    }
}

/// Write a validated key into the config
fn set_value(config: &mut AppConfig, key: &str, value: &str) {
    let value = Some(value.to_string());

    if let Some(field) = key.strip_prefix("provider.") {
        let provider = config.provider.get_or_insert_with(ProviderSection::default);
        match field {
            "api_key" => provider.api_key = value,
            "auth_domain" => provider.auth_domain = value,
            "project_id" => provider.project_id = value,
            "storage_bucket" => provider.storage_bucket = value,
            "messaging_sender_id" => provider.messaging_sender_id = value,
            "app_id" => provider.app_id = value,
            "measurement_id" => provider.measurement_id = value,
            _ => {}
        }
    } else if let Some(field) = key.strip_prefix("relay.") {
        let relay = config.relay.get_or_insert_with(RelaySection::default);
        match field {
            "app_name" => relay.app_name = value,
            "icon" => relay.icon = value,
            "notifier" => relay.notifier = value,
            "transport" => relay.transport = value,
            _ => {}
        }
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "relay.notifier" => {
            value
                .parse::<NotifierKind>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "relay.transport" => {
            value
                .parse::<TransportKind>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "provider.measurement_id" => {} // optional, may be cleared with ""
        _ => {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must not be empty".to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn mask_api_key_long() {
        assert_eq!(mask_api_key("abcdefghijklmnop"), "abcd...mnop");
    }

    #[test]
    fn mask_api_key_short() {
        assert_eq!(mask_api_key("short"), "*****");
    }

    #[test]
    fn validate_notifier() {
        assert!(validate_config_value("relay.notifier", "notify-send").is_ok());
        assert!(validate_config_value("relay.notifier", "growl").is_err());
    }

    #[test]
    fn validate_transport() {
        assert!(validate_config_value("relay.transport", "stdin").is_ok());
        assert!(validate_config_value("relay.transport", "http").is_err());
    }

    #[test]
    fn validate_required_provider_values() {
        assert!(validate_config_value("provider.project_id", "demo").is_ok());
        assert!(validate_config_value("provider.project_id", "  ").is_err());
        assert!(validate_config_value("provider.measurement_id", "").is_ok());
    }

    #[test]
    fn set_then_display_every_key() {
        let mut config = AppConfig::empty();
        for key in VALID_CONFIG_KEYS {
            set_value(&mut config, key, "value-123456789");
        }
        for key in VALID_CONFIG_KEYS {
            let shown = display_value(&config, key).unwrap();
            if *key == "provider.api_key" {
                assert_eq!(shown, "valu...6789");
            } else {
                assert_eq!(shown, "value-123456789");
            }
        }
    }

    #[test]
    fn display_unset_is_none() {
        assert!(display_value(&AppConfig::empty(), "provider.project_id").is_none());
    }

    #[tokio::test]
    async fn set_persists_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "provider.project_id".to_string(),
                value: "demo".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(
            config.provider.and_then(|p| p.project_id),
            Some("demo".to_string())
        );
    }

    #[tokio::test]
    async fn set_unknown_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        let err = handle_config_command(
            ConfigAction::Set {
                key: "api_key".to_string(),
                value: "x".to_string(),
            },
            &store,
            &Presenter::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError { .. }));
        assert!(!store.exists());
    }
}
