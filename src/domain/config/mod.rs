//! Configuration domain module

mod app_config;
mod backend;
mod provider_config;

pub use app_config::{AppConfig, ProviderSection, RelaySection, DEFAULT_APP_NAME, DEFAULT_ICON};
pub use backend::{NotifierKind, TransportKind};
pub use provider_config::ProviderConfig;
