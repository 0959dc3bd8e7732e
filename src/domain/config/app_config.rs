//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

use super::backend::{NotifierKind, TransportKind};
use super::provider_config::ProviderConfig;

/// Default application name shown by the notification server
pub const DEFAULT_APP_NAME: &str = "Push Relay";

/// Default freedesktop icon name
pub const DEFAULT_ICON: &str = "dialog-information";

/// Provider identity section. Validated into [`ProviderConfig`] at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSection {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    pub measurement_id: Option<String>,
}

impl ProviderSection {
    fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            auth_domain: other.auth_domain.or(self.auth_domain),
            project_id: other.project_id.or(self.project_id),
            storage_bucket: other.storage_bucket.or(self.storage_bucket),
            messaging_sender_id: other.messaging_sender_id.or(self.messaging_sender_id),
            app_id: other.app_id.or(self.app_id),
            measurement_id: other.measurement_id.or(self.measurement_id),
        }
    }
}

/// Relay behaviour section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySection {
    pub app_name: Option<String>,
    pub icon: Option<String>,
    pub notifier: Option<String>,
    pub transport: Option<String>,
}

impl RelaySection {
    fn merge(self, other: Self) -> Self {
        Self {
            app_name: other.app_name.or(self.app_name),
            icon: other.icon.or(self.icon),
            notifier: other.notifier.or(self.notifier),
            transport: other.transport.or(self.transport),
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: Option<ProviderSection>,
    pub relay: Option<RelaySection>,
}

impl AppConfig {
    /// Create config with default values.
    ///
    /// Provider identity has no defaults; it must come from the file or env.
    pub fn defaults() -> Self {
        Self {
            provider: None,
            relay: Some(RelaySection {
                app_name: Some(DEFAULT_APP_NAME.to_string()),
                icon: Some(DEFAULT_ICON.to_string()),
                notifier: Some(NotifierKind::default().to_string()),
                transport: Some(TransportKind::default().to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            provider: merge_section(self.provider, other.provider, ProviderSection::merge),
            relay: merge_section(self.relay, other.relay, RelaySection::merge),
        }
    }

    /// Validate the provider section into a complete record
    pub fn provider_config(&self) -> Result<ProviderConfig, ConfigError> {
        let section = self.provider.clone().unwrap_or_default();
        ProviderConfig::from_section(&section)
    }

    /// Get the application name, or the default if not set
    pub fn app_name_or_default(&self) -> &str {
        self.relay
            .as_ref()
            .and_then(|r| r.app_name.as_deref())
            .unwrap_or(DEFAULT_APP_NAME)
    }

    /// Get the icon name, or the default if not set
    pub fn icon_or_default(&self) -> &str {
        self.relay
            .as_ref()
            .and_then(|r| r.icon.as_deref())
            .unwrap_or(DEFAULT_ICON)
    }

    /// Get notifier as parsed NotifierKind, or default if not set/invalid
    pub fn notifier_or_default(&self) -> NotifierKind {
        self.relay
            .as_ref()
            .and_then(|r| r.notifier.as_ref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get transport as parsed TransportKind, or default if not set/invalid
    pub fn transport_or_default(&self) -> TransportKind {
        self.relay
            .as_ref()
            .and_then(|r| r.transport.as_ref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

fn merge_section<T>(base: Option<T>, other: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (base, other) {
        (None, None) => None,
        (Some(b), None) => Some(b),
        (None, Some(o)) => Some(o),
        (Some(b), Some(o)) => Some(merge(b, o)),
    }
}
