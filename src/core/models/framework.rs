use serde::{Deserialize, Serialize};

/// Lifecycle status of a procurement framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkStatus {
    Coming,
    Open,
    Pending,
    Standstill,
    Live,
    Expired,
    #[serde(other)]
    Unknown,
}

/// A procurement framework (e.g. G-Cloud 9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Framework {
    pub slug: String,
    pub name: String,
    pub status: FrameworkStatus,
}

impl Framework {
    pub fn is_live(&self) -> bool {
        self.status == FrameworkStatus::Live
    }
}
