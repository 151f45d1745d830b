use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Audit type recorded by the data API when a supplier edits a service.
pub const UPDATE_SERVICE: &str = "update_service";

/// An audit event as returned by the data API.
///
/// Events are created by the API; this tool only reads them and flips
/// `acknowledged` through the approve action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub id: u64,
    #[serde(rename = "type")]
    pub audit_type: String,
    #[serde(default)]
    pub acknowledged: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub data: AuditEventData,
}

/// Payload of an `update_service` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventData {
    #[serde(default, deserialize_with = "string_or_number")]
    pub service_id: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub old_archived_service_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub new_archived_service_id: Option<String>,
}

impl AuditEvent {
    pub fn is_service_update(&self) -> bool {
        self.audit_type == UPDATE_SERVICE
    }

    /// The service id embedded in the event payload, if any.
    pub fn service_id(&self) -> Option<&str> {
        self.data.service_id.as_deref()
    }

    /// Creation time as shown in the moderation table, e.g. `15 July at 18:03:43`.
    pub fn edited_label(&self) -> String {
        self.created_at.format("%-d %B at %H:%M:%S").to_string()
    }
}

/// Ids travel as strings in some payloads and as numbers in others.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
