//! Provider configuration record

use std::fmt;

use crate::domain::error::ConfigError;

use super::app_config::ProviderSection;

/// Identity and routing record for one messaging-provider project.
///
/// Must match the record used by the foreground application exactly, or the
/// provider will never route messages here. That mismatch cannot be detected
/// locally.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: Option<String>,
}

impl ProviderConfig {
    /// Validate a partially-filled config section.
    ///
    /// Every field except `measurement_id` is required and must be non-empty.
    pub fn from_section(section: &ProviderSection) -> Result<Self, ConfigError> {
        fn required(value: &Option<String>, key: &str) -> Result<String, ConfigError> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MissingProviderField(format!("provider.{}", key)))
        }

        Ok(Self {
            api_key: required(&section.api_key, "api_key")?,
            auth_domain: required(&section.auth_domain, "auth_domain")?,
            project_id: required(&section.project_id, "project_id")?,
            storage_bucket: required(&section.storage_bucket, "storage_bucket")?,
            messaging_sender_id: required(&section.messaging_sender_id, "messaging_sender_id")?,
            app_id: required(&section.app_id, "app_id")?,
            measurement_id: section
                .measurement_id
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        })
    }

    /// Stable key identifying the provider route for this record.
    ///
    /// Only ASCII alphanumerics, `-` and `_` survive; everything else becomes `_`.
    pub fn routing_key(&self) -> String {
        format!("{}-{}", self.project_id, self.messaging_sender_id)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .field("measurement_id", &self.measurement_id)
            .finish()
    }
}
