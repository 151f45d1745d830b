use std::path::PathBuf;

/// All domain errors for the admin tool.
///
/// Request-level variants (`AccessDenied`, `NotFound`, `Gone`,
/// `MethodNotAllowed`) end the request with their own status code;
/// everything else is a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Access denied: {reason}")]
    AccessDenied { reason: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Gone: {what}")]
    Gone { what: String },

    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("Data API request failed: {reason}")]
    DataApi { reason: String },

    #[error(
        "Config file not found: {path}\n\n  \
         Create it or point to another file with --config.\n  \
         Run 'marketplace-admin check-config' to validate a file."
    )]
    ConfigNotFound { path: PathBuf },

    #[error(
        "Invalid configuration: {detail}\n\n  \
         Expected sections: [server], [data_api], [identity].\n  \
         [data_api] needs exactly one of base_url or fixture."
    )]
    InvalidConfig { detail: String },

    #[error("Server error: {reason}")]
    Server { reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AdminError {
    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            AdminError::AccessDenied { .. } => 403,
            AdminError::NotFound { .. } => 404,
            AdminError::MethodNotAllowed { .. } => 405,
            AdminError::Gone { .. } => 410,
            _ => 500,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        AdminError::NotFound { what: what.into() }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        AdminError::AccessDenied {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AdminError>;
