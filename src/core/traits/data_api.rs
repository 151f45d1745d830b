use crate::core::errors::Result;
use crate::core::models::audit_event::AuditEvent;
use crate::core::models::framework::Framework;
use crate::core::models::role::Role;
use crate::core::models::supplier_export::SupplierExportRecord;
use crate::core::models::user::{User, UserUpdate};

/// Filter for `find_audit_events`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEventQuery {
    pub audit_type: String,
    pub acknowledged: Option<bool>,
    pub latest_first: bool,
}

impl AuditEventQuery {
    /// Unacknowledged service edits, oldest first.
    pub fn unacknowledged_service_updates() -> Self {
        Self {
            audit_type: crate::core::models::audit_event::UPDATE_SERVICE.to_string(),
            acknowledged: Some(false),
            latest_first: false,
        }
    }
}

/// Lazily fetched sequence of users. Calling `find_users_iter` again
/// starts a fresh sequence from the first page.
pub type UserIter<'a> = Box<dyn Iterator<Item = Result<User>> + 'a>;

/// Port for the remote marketplace data API.
///
/// Implementations live in `adapters::data_api` (HTTP, JSON fixture).
/// Handlers only see this trait so tests can substitute a fake.
pub trait DataApiClient: Send + Sync {
    /// All audit events matching the query, across every page.
    fn find_audit_events(&self, query: &AuditEventQuery) -> Result<Vec<AuditEvent>>;

    /// A single audit event, or `None` when the API has no such id.
    fn get_audit_event(&self, audit_event_id: u64) -> Result<Option<AuditEvent>>;

    /// Acknowledge `audit_event_id` and every earlier unacknowledged
    /// update for the same service.
    fn acknowledge_service_update_including_previous(
        &self,
        service_id: &str,
        audit_event_id: u64,
        updated_by: &str,
    ) -> Result<()>;

    fn get_user(&self, email_address: &str) -> Result<Option<User>>;

    fn update_user(&self, user_id: u64, update: &UserUpdate, updated_by: &str) -> Result<()>;

    fn find_frameworks(&self) -> Result<Vec<Framework>>;

    fn get_framework(&self, slug: &str) -> Result<Option<Framework>>;

    /// Per-user export rows for every supplier that touched the framework.
    fn export_users(&self, framework_slug: &str) -> Result<Vec<SupplierExportRecord>>;

    fn find_users_iter(&self, role: Role) -> UserIter<'_>;
}
