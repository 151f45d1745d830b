use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use serde::Deserialize;

use crate::core::errors::{AdminError, Result};
use crate::core::models::audit_event::AuditEvent;
use crate::core::models::framework::Framework;
use crate::core::models::role::Role;
use crate::core::models::supplier_export::SupplierExportRecord;
use crate::core::models::user::{User, UserUpdate};
use crate::core::traits::data_api::{AuditEventQuery, DataApiClient, UserIter};

/// Snapshot of data API contents, as stored in a fixture file.
///
/// ```json
/// {
///   "auditEvents": [ ... ],
///   "users": [ ... ],
///   "frameworks": [ ... ],
///   "supplierExports": { "g-cloud-7": [ ... ] }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub audit_events: Vec<AuditEvent>,
    pub users: Vec<User>,
    pub frameworks: Vec<Framework>,
    pub supplier_exports: HashMap<String, Vec<SupplierExportRecord>>,
}

/// `DataApiClient` serving a JSON snapshot from disk.
///
/// Used for demos and offline exports. Writes (acknowledge, account
/// actions) change the in-memory copy only; the file is never rewritten.
pub struct FixtureDataApi {
    data: Mutex<Snapshot>,
}

impl FixtureDataApi {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            data: Mutex::new(snapshot),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AdminError::InvalidConfig {
                detail: format!("fixture file {} does not exist", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| AdminError::InvalidConfig {
                detail: format!("Failed to parse fixture {}: {e}", path.display()),
            })?;
        tracing::info!(
            path = %path.display(),
            audit_events = snapshot.audit_events.len(),
            users = snapshot.users.len(),
            frameworks = snapshot.frameworks.len(),
            "loaded data api fixture"
        );
        Ok(Self::new(snapshot))
    }

    fn data(&self) -> Result<MutexGuard<'_, Snapshot>> {
        self.data.lock().map_err(|_| AdminError::DataApi {
            reason: "fixture state poisoned by an earlier panic".into(),
        })
    }
}

impl DataApiClient for FixtureDataApi {
    fn find_audit_events(&self, query: &AuditEventQuery) -> Result<Vec<AuditEvent>> {
        let data = self.data()?;
        let mut events: Vec<AuditEvent> = data
            .audit_events
            .iter()
            .filter(|e| e.audit_type == query.audit_type)
            .filter(|e| query.acknowledged.is_none_or(|ack| e.acknowledged == ack))
            .cloned()
            .collect();
        if query.latest_first {
            events.reverse();
        }
        Ok(events)
    }

    fn get_audit_event(&self, audit_event_id: u64) -> Result<Option<AuditEvent>> {
        Ok(self
            .data()?
            .audit_events
            .iter()
            .find(|e| e.id == audit_event_id)
            .cloned())
    }

    fn acknowledge_service_update_including_previous(
        &self,
        service_id: &str,
        audit_event_id: u64,
        _updated_by: &str,
    ) -> Result<()> {
        let mut data = self.data()?;
        let mut touched = 0;
        for event in data.audit_events.iter_mut().filter(|e| {
            e.is_service_update() && e.service_id() == Some(service_id) && e.id <= audit_event_id
        }) {
            event.acknowledged = true;
            touched += 1;
        }
        if touched == 0 {
            return Err(AdminError::DataApi {
                reason: format!("no update {audit_event_id} for service {service_id}"),
            });
        }
        Ok(())
    }

    fn get_user(&self, email_address: &str) -> Result<Option<User>> {
        Ok(self
            .data()?
            .users
            .iter()
            .find(|u| u.email_address.eq_ignore_ascii_case(email_address))
            .cloned())
    }

    fn update_user(&self, user_id: u64, update: &UserUpdate, _updated_by: &str) -> Result<()> {
        let mut data = self.data()?;
        let user = data
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AdminError::DataApi {
                reason: format!("user {user_id} does not exist"),
            })?;
        if let Some(locked) = update.locked {
            user.locked = locked;
        }
        if let Some(active) = update.active {
            user.active = active;
        }
        Ok(())
    }

    fn find_frameworks(&self) -> Result<Vec<Framework>> {
        Ok(self.data()?.frameworks.clone())
    }

    fn get_framework(&self, slug: &str) -> Result<Option<Framework>> {
        Ok(self
            .data()?
            .frameworks
            .iter()
            .find(|f| f.slug == slug)
            .cloned())
    }

    fn export_users(&self, framework_slug: &str) -> Result<Vec<SupplierExportRecord>> {
        Ok(self
            .data()?
            .supplier_exports
            .get(framework_slug)
            .cloned()
            .unwrap_or_default())
    }

    fn find_users_iter(&self, role: Role) -> UserIter<'_> {
        match self.data() {
            Ok(data) => {
                let users: Vec<User> = data
                    .users
                    .iter()
                    .filter(|u| u.parsed_role() == Some(role))
                    .cloned()
                    .collect();
                Box::new(users.into_iter().map(Ok::<_, AdminError>))
            }
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    }
}
