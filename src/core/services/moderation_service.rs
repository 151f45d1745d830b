use crate::core::errors::{AdminError, Result};
use crate::core::models::audit_event::AuditEvent;
use crate::core::models::identity::CurrentUser;
use crate::core::traits::data_api::{AuditEventQuery, DataApiClient};

/// One row of the unapproved-edits table.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpdate {
    pub supplier_name: String,
    pub service_id: String,
    pub edited: String,
    pub changes_url: String,
}

impl PendingUpdate {
    fn from_event(event: &AuditEvent) -> Self {
        let service_id = event.service_id().unwrap_or_default().to_string();
        Self {
            supplier_name: event.data.supplier_name.clone().unwrap_or_default(),
            changes_url: format!("/admin/services/{service_id}/updates"),
            edited: event.edited_label(),
            service_id,
        }
    }
}

/// `1 edited service`, `N edited services` (including zero).
pub fn edited_services_label(count: usize) -> String {
    if count == 1 {
        "1 edited service".to_string()
    } else {
        format!("{count} edited services")
    }
}

/// Lists and approves supplier service edits awaiting staff review.
pub struct ModerationService<'a> {
    pub api: &'a dyn DataApiClient,
}

impl<'a> ModerationService<'a> {
    /// Unacknowledged service edits in the order the API returns them.
    pub fn list_unapproved(&self) -> Result<Vec<PendingUpdate>> {
        let events = self
            .api
            .find_audit_events(&AuditEventQuery::unacknowledged_service_updates())?;
        Ok(events.iter().map(PendingUpdate::from_event).collect())
    }

    /// Approve one service edit and return the confirmation message.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the event is missing, belongs to another service,
    ///   or is not an `update_service` event.
    /// - `Gone` if the event was already acknowledged.
    pub fn approve(
        &self,
        service_id: &str,
        audit_event_id: u64,
        approver: &CurrentUser,
    ) -> Result<String> {
        let event = self
            .api
            .get_audit_event(audit_event_id)?
            .ok_or_else(|| AdminError::not_found(format!("audit event {audit_event_id}")))?;

        if event.service_id() != Some(service_id) {
            return Err(AdminError::not_found(format!(
                "audit event {audit_event_id} for service {service_id}"
            )));
        }
        if !event.is_service_update() {
            return Err(AdminError::not_found(format!(
                "audit event {audit_event_id} is '{}', not a service update",
                event.audit_type
            )));
        }
        if event.acknowledged {
            return Err(AdminError::Gone {
                what: format!("audit event {audit_event_id} was already approved"),
            });
        }

        self.api.acknowledge_service_update_including_previous(
            service_id,
            audit_event_id,
            &approver.email_address,
        )?;
        tracing::info!(
            service_id,
            audit_event_id,
            approver = %approver.email_address,
            "approved service update"
        );

        Ok(format!("The changes to service {service_id} were approved."))
    }
}
