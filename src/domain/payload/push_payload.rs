//! Push payload as delivered by the messaging provider

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `notification` block of a push payload.
///
/// Both fields are optional on the wire; the relay never rejects a payload
/// for missing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Message data delivered by an external messaging provider.
///
/// Shape on the wire:
/// `{ "notification": { "title": "...", "body": "..." }, "data": { ... } }`
///
/// `data` is opaque provider metadata and is carried through untouched;
/// values may be any JSON type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, Value>>,
}

impl PushPayload {
    /// Build a payload with a notification block
    pub fn new(title: Option<String>, body: Option<String>) -> Self {
        Self {
            notification: Some(NotificationContent { title, body }),
            data: None,
        }
    }

    /// Attach provider metadata
    pub fn with_data(mut self, data: BTreeMap<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach string-valued metadata, as entered on a command line
    pub fn with_string_data<I>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.with_data(
            entries
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        )
    }

    /// Parse a single JSON document
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Serialize to a single-line JSON document
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Title, if the provider sent one
    pub fn title(&self) -> Option<&str> {
        self.notification.as_ref().and_then(|n| n.title.as_deref())
    }

    /// Body, if the provider sent one
    pub fn body(&self) -> Option<&str> {
        self.notification.as_ref().and_then(|n| n.body.as_deref())
    }
}
