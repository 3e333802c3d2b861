//! Hook (webhook) and event models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{HookStatus, HookValidity};
use super::primitives::HookId;

/// A notification endpoint registered for one event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hook {
    /// Hook id
    pub id: HookId,
    /// Notified URL
    pub url: String,
    /// Event type, e.g. `PAYIN_NORMAL_SUCCEEDED`
    pub event_type: String,
    /// Enabled or disabled
    pub status: HookStatus,
    /// Whether the URL is reachable
    #[serde(default)]
    pub validity: Option<HookValidity>,
    /// Free-form tag
    #[serde(default)]
    pub tag: Option<String>,
    /// When the hook was created
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Payload for registering a hook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewHook {
    /// Event type to subscribe to
    pub event_type: String,
    /// URL to notify
    pub url: String,
    /// Free-form tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Payload for updating a hook.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HookUpdate {
    /// New URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HookStatus>,
    /// New tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Something that happened to a resource, as listed by the events endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    /// Affected resource
    pub resource_id: String,
    /// Event type
    pub event_type: String,
    /// When it happened
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_update_only_sends_set_fields() {
        let update = HookUpdate {
            status: Some(HookStatus::Disabled),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            serde_json::json!({ "Status": "DISABLED" })
        );
    }

    #[test]
    fn test_event_deserialize() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "ResourceId": "8494526",
            "EventType": "PAYIN_NORMAL_SUCCEEDED",
            "Date": 1383321421
        }))
        .unwrap();
        assert_eq!(event.date.timestamp(), 1383321421);
    }
}
