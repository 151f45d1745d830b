use regex::Regex;

use crate::config::app_config::IdentitySection;
use crate::core::errors::{AdminError, Result};
use crate::core::models::identity::CurrentUser;
use crate::core::models::role::Role;
use crate::core::services::access_guard::{self, *};
use crate::core::traits::clock::Clock;
use crate::core::traits::data_api::DataApiClient;

use super::handlers;
use super::http::{HttpRequest, HttpResponse, Method};
use super::identity::current_user;
use super::views;

/// What a handler gets after routing and the role check.
pub struct RouteContext<'r> {
    pub request: &'r HttpRequest,
    pub user: CurrentUser,
    /// Path captures, in pattern order.
    pub params: Vec<String>,
}

impl RouteContext<'_> {
    pub fn param(&self, index: usize) -> &str {
        self.params.get(index).map(String::as_str).unwrap_or_default()
    }
}

pub type Handler = fn(&App, &RouteContext<'_>) -> Result<HttpResponse>;

/// One entry of the route table: the roles are data, checked before the
/// handler runs.
pub struct Route {
    pub name: &'static str,
    pub method: Method,
    pub pattern: Regex,
    pub roles: &'static [Role],
    pub handler: Handler,
}

fn route(
    name: &'static str,
    method: Method,
    pattern: &str,
    roles: &'static [Role],
    handler: Handler,
) -> Result<Route> {
    let pattern = Regex::new(pattern).map_err(|e| AdminError::Server {
        reason: format!("bad route pattern for {name}: {e}"),
    })?;
    Ok(Route {
        name,
        method,
        pattern,
        roles,
        handler,
    })
}

/// The admin route table.
pub fn routes() -> Result<Vec<Route>> {
    Ok(vec![
        route("index", Method::Get, r"^/admin/?$", ADMIN_INDEX_ROLES, handlers::admin_index)?,
        route(
            "service_updates",
            Method::Get,
            r"^/admin/services/updates/unapproved$",
            SERVICE_MODERATION_ROLES,
            handlers::list_service_updates,
        )?,
        route(
            "approve_service_update",
            Method::Post,
            r"^/admin/services/([^/]+)/updates/([0-9]+)/approve$",
            SERVICE_MODERATION_ROLES,
            handlers::approve_service_update,
        )?,
        route("find_user", Method::Get, r"^/admin/users$", USER_LOOKUP_ROLES, handlers::find_user)?,
        route(
            "unlock_user",
            Method::Post,
            r"^/admin/suppliers/users/([0-9]+)/unlock$",
            USER_LOOKUP_ROLES,
            handlers::unlock_user,
        )?,
        route(
            "deactivate_user",
            Method::Post,
            r"^/admin/suppliers/users/([0-9]+)/deactivate$",
            USER_LOOKUP_ROLES,
            handlers::deactivate_user,
        )?,
        route(
            "framework_users",
            Method::Get,
            r"^/admin/frameworks/([^/]+)/users$",
            FRAMEWORK_USERS_ROLES,
            handlers::framework_users,
        )?,
        route(
            "download_supplier_users",
            Method::Get,
            r"^/admin/frameworks/([^/]+)/users/download$",
            SUPPLIER_EXPORT_ROLES,
            handlers::download_supplier_users,
        )?,
        route(
            "download_buyers",
            Method::Get,
            r"^/admin/users/download/buyers$",
            BUYER_EXPORT_ROLES,
            handlers::download_buyers,
        )?,
        route(
            "supplier_research_hub",
            Method::Get,
            r"^/admin/users/download/suppliers$",
            RESEARCH_HUB_ROLES,
            handlers::supplier_research_hub,
        )?,
    ])
}

/// The admin application: route table plus its injected collaborators.
pub struct App {
    api: Box<dyn DataApiClient>,
    clock: Box<dyn Clock>,
    identity: IdentitySection,
    routes: Vec<Route>,
}

impl App {
    pub fn new(
        api: Box<dyn DataApiClient>,
        clock: Box<dyn Clock>,
        identity: IdentitySection,
    ) -> Result<Self> {
        Ok(Self {
            api,
            clock,
            identity,
            routes: routes()?,
        })
    }

    pub fn api(&self) -> &dyn DataApiClient {
        self.api.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Route, guard and run one request. Never fails: errors become
    /// their status page.
    pub fn handle(&self, req: &HttpRequest) -> HttpResponse {
        let response = self.dispatch(req).unwrap_or_else(|e| {
            let status = e.status_code();
            if status >= 500 {
                tracing::error!(
                    method = req.method.as_str(),
                    path = %req.path,
                    error = %e,
                    "request failed"
                );
            } else {
                tracing::warn!(
                    method = req.method.as_str(),
                    path = %req.path,
                    status,
                    reason = %e,
                    "request refused"
                );
            }
            HttpResponse::html(status, views::error_page(status))
        });
        tracing::info!(
            method = req.method.as_str(),
            path = %req.path,
            status = response.status,
            "handled request"
        );
        response
    }

    fn dispatch(&self, req: &HttpRequest) -> Result<HttpResponse> {
        let mut path_matched = false;
        for route in &self.routes {
            let Some(captures) = route.pattern.captures(&req.path) else {
                continue;
            };
            path_matched = true;
            if route.method != req.method {
                continue;
            }

            let user = current_user(req, &self.identity)?;
            access_guard::ensure_any_role(&user, route.roles)?;
            tracing::debug!(
                route = route.name,
                user = %user.email_address,
                role = %user.role,
                "dispatching"
            );

            let params = captures
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect();
            let ctx = RouteContext {
                request: req,
                user,
                params,
            };
            return (route.handler)(self, &ctx);
        }

        if path_matched {
            Err(AdminError::MethodNotAllowed {
                method: req.method.as_str().to_string(),
                path: req.path.clone(),
            })
        } else {
            Err(AdminError::not_found(format!("no page at {}", req.path)))
        }
    }
}
