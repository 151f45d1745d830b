use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account roles known to the data API.
///
/// Only the `admin*` roles can use this tool; `buyer` and `supplier`
/// appear on the accounts being looked up or exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Buyer,
    Supplier,
    Admin,
    AdminCcsCategory,
    AdminCcsSourcing,
    AdminManager,
    AdminFrameworkManager,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Buyer,
        Role::Supplier,
        Role::Admin,
        Role::AdminCcsCategory,
        Role::AdminCcsSourcing,
        Role::AdminManager,
        Role::AdminFrameworkManager,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Supplier => "supplier",
            Role::Admin => "admin",
            Role::AdminCcsCategory => "admin-ccs-category",
            Role::AdminCcsSourcing => "admin-ccs-sourcing",
            Role::AdminManager => "admin-manager",
            Role::AdminFrameworkManager => "admin-framework-manager",
        }
    }

    /// True for the staff roles allowed to sign in to the admin tool.
    pub fn is_admin(self) -> bool {
        !matches!(self, Role::Buyer | Role::Supplier)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == trimmed)
            .ok_or_else(|| UnknownRole(trimmed.to_string()))
    }
}
