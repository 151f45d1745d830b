use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// A user account owned by the data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email_address: String,
    /// Raw role string; buyer listings may omit it entirely.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub supplier: Option<SupplierRef>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub password_changed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub logged_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_research_opted_in: bool,
}

fn default_active() -> bool {
    true
}

/// The supplier organisation a supplier user belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRef {
    pub supplier_id: u64,
    pub name: String,
}

impl User {
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    /// The linked supplier, only when the account actually has the supplier role.
    pub fn supplier_link(&self) -> Option<&SupplierRef> {
        match self.parsed_role() {
            Some(Role::Supplier) => self.supplier.as_ref(),
            _ => None,
        }
    }
}

/// Partial update sent to the data API for account actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UserUpdate {
    pub fn unlock() -> Self {
        Self {
            locked: Some(false),
            ..Self::default()
        }
    }

    pub fn deactivate() -> Self {
        Self {
            active: Some(false),
            ..Self::default()
        }
    }
}

/// Split a timestamp into the `HH:MM:SS` and `D Month` strings shown
/// on the user summary. Missing timestamps render as empty strings.
pub fn split_timestamp(at: Option<&DateTime<Utc>>) -> (String, String) {
    match at {
        Some(t) => (
            t.format("%H:%M:%S").to_string(),
            t.format("%-d %B").to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
