//! In-memory doubles for the data API and clock, shared by unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::core::errors::{AdminError, Result};
use crate::core::models::audit_event::AuditEvent;
use crate::core::models::framework::Framework;
use crate::core::models::role::Role;
use crate::core::models::supplier_export::SupplierExportRecord;
use crate::core::models::user::{User, UserUpdate};
use crate::core::traits::clock::Clock;
use crate::core::traits::data_api::{AuditEventQuery, DataApiClient, UserIter};

/// A write the fake received.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiWrite {
    Acknowledge {
        service_id: String,
        audit_event_id: u64,
        updated_by: String,
    },
    UpdateUser {
        user_id: u64,
        update: UserUpdate,
        updated_by: String,
    },
}

#[derive(Default)]
pub struct FakeDataApi {
    pub audit_events: Vec<AuditEvent>,
    pub users: Vec<User>,
    pub frameworks: Vec<Framework>,
    pub supplier_export: Vec<SupplierExportRecord>,
    pub fail_reads: bool,
    pub writes: Mutex<Vec<ApiWrite>>,
}

impl FakeDataApi {
    pub fn writes(&self) -> Vec<ApiWrite> {
        self.writes.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail_reads {
            Err(AdminError::DataApi {
                reason: "fake outage".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl DataApiClient for FakeDataApi {
    fn find_audit_events(&self, query: &AuditEventQuery) -> Result<Vec<AuditEvent>> {
        self.check()?;
        Ok(self
            .audit_events
            .iter()
            .filter(|e| e.audit_type == query.audit_type)
            .filter(|e| query.acknowledged.is_none_or(|ack| e.acknowledged == ack))
            .cloned()
            .collect())
    }

    fn get_audit_event(&self, audit_event_id: u64) -> Result<Option<AuditEvent>> {
        self.check()?;
        Ok(self
            .audit_events
            .iter()
            .find(|e| e.id == audit_event_id)
            .cloned())
    }

    fn acknowledge_service_update_including_previous(
        &self,
        service_id: &str,
        audit_event_id: u64,
        updated_by: &str,
    ) -> Result<()> {
        self.writes.lock().unwrap().push(ApiWrite::Acknowledge {
            service_id: service_id.to_string(),
            audit_event_id,
            updated_by: updated_by.to_string(),
        });
        Ok(())
    }

    fn get_user(&self, email_address: &str) -> Result<Option<User>> {
        self.check()?;
        Ok(self
            .users
            .iter()
            .find(|u| u.email_address == email_address)
            .cloned())
    }

    fn update_user(&self, user_id: u64, update: &UserUpdate, updated_by: &str) -> Result<()> {
        self.writes.lock().unwrap().push(ApiWrite::UpdateUser {
            user_id,
            update: update.clone(),
            updated_by: updated_by.to_string(),
        });
        Ok(())
    }

    fn find_frameworks(&self) -> Result<Vec<Framework>> {
        self.check()?;
        Ok(self.frameworks.clone())
    }

    fn get_framework(&self, slug: &str) -> Result<Option<Framework>> {
        self.check()?;
        Ok(self.frameworks.iter().find(|f| f.slug == slug).cloned())
    }

    fn export_users(&self, _framework_slug: &str) -> Result<Vec<SupplierExportRecord>> {
        self.check()?;
        Ok(self.supplier_export.clone())
    }

    fn find_users_iter(&self, role: Role) -> UserIter<'_> {
        if self.fail_reads {
            return Box::new(std::iter::once(Err(AdminError::DataApi {
                reason: "fake outage".into(),
            })));
        }
        Box::new(
            self.users
                .iter()
                .filter(move |u| u.role.is_empty() || u.parsed_role() == Some(role))
                .cloned()
                .map(Ok::<_, AdminError>),
        )
    }
}

/// Lets a test keep a handle on the fake after an `App` takes ownership.
impl DataApiClient for Arc<FakeDataApi> {
    fn find_audit_events(&self, query: &AuditEventQuery) -> Result<Vec<AuditEvent>> {
        self.as_ref().find_audit_events(query)
    }

    fn get_audit_event(&self, audit_event_id: u64) -> Result<Option<AuditEvent>> {
        self.as_ref().get_audit_event(audit_event_id)
    }

    fn acknowledge_service_update_including_previous(
        &self,
        service_id: &str,
        audit_event_id: u64,
        updated_by: &str,
    ) -> Result<()> {
        self.as_ref()
            .acknowledge_service_update_including_previous(service_id, audit_event_id, updated_by)
    }

    fn get_user(&self, email_address: &str) -> Result<Option<User>> {
        self.as_ref().get_user(email_address)
    }

    fn update_user(&self, user_id: u64, update: &UserUpdate, updated_by: &str) -> Result<()> {
        self.as_ref().update_user(user_id, update, updated_by)
    }

    fn find_frameworks(&self) -> Result<Vec<Framework>> {
        self.as_ref().find_frameworks()
    }

    fn get_framework(&self, slug: &str) -> Result<Option<Framework>> {
        self.as_ref().get_framework(slug)
    }

    fn export_users(&self, framework_slug: &str) -> Result<Vec<SupplierExportRecord>> {
        self.as_ref().export_users(framework_slug)
    }

    fn find_users_iter(&self, role: Role) -> UserIter<'_> {
        self.as_ref().find_users_iter(role)
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Self {
        Self(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn buyer(id: u64, name: &str, opted_in: bool) -> User {
    User {
        id,
        name: name.to_string(),
        email_address: format!("{}@gov.uk", name.to_lowercase()),
        role: "buyer".to_string(),
        supplier: None,
        locked: false,
        active: true,
        password_changed_at: None,
        logged_in_at: None,
        user_research_opted_in: opted_in,
    }
}

pub fn framework(slug: &str, name: &str, status: &str) -> Framework {
    serde_json::from_value(serde_json::json!({
        "slug": slug,
        "name": name,
        "status": status,
    }))
    .unwrap()
}

pub fn service_update(
    id: u64,
    service_id: &str,
    supplier_name: &str,
    created_at: &str,
    acknowledged: bool,
) -> AuditEvent {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "type": "update_service",
        "acknowledged": acknowledged,
        "createdAt": created_at,
        "data": {
            "serviceId": service_id,
            "supplierName": supplier_name,
            "oldArchivedServiceId": "240697",
            "newArchivedServiceId": "240680",
        },
    }))
    .unwrap()
}
