use std::collections::VecDeque;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::errors::{AdminError, Result};
use crate::core::models::audit_event::AuditEvent;
use crate::core::models::framework::Framework;
use crate::core::models::role::Role;
use crate::core::models::supplier_export::SupplierExportRecord;
use crate::core::models::user::{User, UserUpdate};
use crate::core::traits::data_api::{AuditEventQuery, DataApiClient, UserIter};

/// Default request timeout when the config does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default, Deserialize)]
struct Links {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditEventPage {
    audit_events: Vec<AuditEvent>,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SingleAuditEvent {
    audit_events: AuditEvent,
}

#[derive(Debug, Deserialize)]
struct SingleUser {
    users: User,
}

#[derive(Debug, Deserialize)]
struct UserPage {
    users: Vec<User>,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Deserialize)]
struct FrameworkList {
    frameworks: Vec<Framework>,
}

#[derive(Debug, Deserialize)]
struct SingleFramework {
    frameworks: Framework,
}

#[derive(Debug, Deserialize)]
struct SupplierExport {
    users: Vec<SupplierExportRecord>,
}

/// `DataApiClient` backed by the marketplace data API over HTTPS.
///
/// Calls are blocking: each one drives the async reqwest client on a
/// private current-thread runtime.
pub struct HttpDataApi {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpDataApi {
    pub fn new(base_url: &str, auth_token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("marketplace-admin/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdminError::DataApi {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AdminError::DataApi {
                reason: format!("Failed to create async runtime: {e}"),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.to_string(),
            client,
            runtime,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `url` and decode the body. A 404 from the API is `Ok(None)`.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        tracing::debug!(url, "data api GET");
        self.runtime.block_on(async {
            let resp = self
                .client
                .get(url)
                .bearer_auth(&self.auth_token)
                .send()
                .await
                .map_err(|e| AdminError::DataApi {
                    reason: format!("GET {url} failed: {e}"),
                })?;

            if resp.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            if !resp.status().is_success() {
                return Err(AdminError::DataApi {
                    reason: format!("GET {url} returned status {}", resp.status()),
                });
            }

            resp.json::<T>().await.map(Some).map_err(|e| AdminError::DataApi {
                reason: format!("Failed to parse response from {url}: {e}"),
            })
        })
    }

    fn require_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json(url)?.ok_or_else(|| AdminError::DataApi {
            reason: format!("GET {url} returned status 404 Not Found"),
        })
    }

    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<()> {
        let url = self.url(path);
        tracing::debug!(url, "data api POST");
        self.runtime.block_on(async {
            let resp = self
                .client
                .post(&url)
                .bearer_auth(&self.auth_token)
                .json(body)
                .send()
                .await
                .map_err(|e| AdminError::DataApi {
                    reason: format!("POST {url} failed: {e}"),
                })?;

            if !resp.status().is_success() {
                return Err(AdminError::DataApi {
                    reason: format!("POST {url} returned status {}", resp.status()),
                });
            }
            Ok(())
        })
    }
}

/// Query string for an audit event search.
fn audit_event_query_string(query: &AuditEventQuery) -> String {
    let mut params = vec![format!("audit-type={}", urlencoding::encode(&query.audit_type))];
    if let Some(ack) = query.acknowledged {
        params.push(format!("acknowledged={ack}"));
    }
    params.push(format!("latest_first={}", query.latest_first));
    params.join("&")
}

impl DataApiClient for HttpDataApi {
    fn find_audit_events(&self, query: &AuditEventQuery) -> Result<Vec<AuditEvent>> {
        let mut events = Vec::new();
        let mut next = Some(self.url(&format!(
            "/audit-events?{}",
            audit_event_query_string(query)
        )));

        while let Some(url) = next {
            let page: AuditEventPage = self.require_json(&url)?;
            events.extend(page.audit_events);
            next = page.links.next;
        }
        Ok(events)
    }

    fn get_audit_event(&self, audit_event_id: u64) -> Result<Option<AuditEvent>> {
        let found: Option<SingleAuditEvent> =
            self.get_json(&self.url(&format!("/audit-events/{audit_event_id}")))?;
        Ok(found.map(|f| f.audit_events))
    }

    fn acknowledge_service_update_including_previous(
        &self,
        service_id: &str,
        audit_event_id: u64,
        updated_by: &str,
    ) -> Result<()> {
        self.post_json(
            &format!("/services/{}/updates/acknowledge", urlencoding::encode(service_id)),
            &serde_json::json!({
                "updated_by": updated_by,
                "latestAuditEventId": audit_event_id,
            }),
        )
    }

    fn get_user(&self, email_address: &str) -> Result<Option<User>> {
        let found: Option<SingleUser> = self.get_json(&self.url(&format!(
            "/users?email_address={}",
            urlencoding::encode(email_address)
        )))?;
        Ok(found.map(|f| f.users))
    }

    fn update_user(&self, user_id: u64, update: &UserUpdate, updated_by: &str) -> Result<()> {
        self.post_json(
            &format!("/users/{user_id}"),
            &serde_json::json!({
                "users": update,
                "updated_by": updated_by,
            }),
        )
    }

    fn find_frameworks(&self) -> Result<Vec<Framework>> {
        let list: FrameworkList = self.require_json(&self.url("/frameworks"))?;
        Ok(list.frameworks)
    }

    fn get_framework(&self, slug: &str) -> Result<Option<Framework>> {
        let found: Option<SingleFramework> = self.get_json(&self.url(&format!(
            "/frameworks/{}",
            urlencoding::encode(slug)
        )))?;
        Ok(found.map(|f| f.frameworks))
    }

    fn export_users(&self, framework_slug: &str) -> Result<Vec<SupplierExportRecord>> {
        let export: SupplierExport = self.require_json(&self.url(&format!(
            "/users/export/{}",
            urlencoding::encode(framework_slug)
        )))?;
        Ok(export.users)
    }

    fn find_users_iter(&self, role: Role) -> UserIter<'_> {
        Box::new(UserPages {
            api: self,
            next_url: Some(self.url(&format!("/users?role={role}"))),
            buffer: VecDeque::new(),
        })
    }
}

/// Walks `/users` pages on demand, following `links.next`.
struct UserPages<'a> {
    api: &'a HttpDataApi,
    next_url: Option<String>,
    buffer: VecDeque<User>,
}

impl Iterator for UserPages<'_> {
    type Item = Result<User>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(user) = self.buffer.pop_front() {
                return Some(Ok(user));
            }
            let url = self.next_url.take()?;
            match self.api.require_json::<UserPage>(&url) {
                Ok(page) => {
                    self.buffer.extend(page.users);
                    self.next_url = page.links.next;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
