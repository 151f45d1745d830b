use crate::config::app_config::IdentitySection;
use crate::core::errors::{AdminError, Result};
use crate::core::models::identity::CurrentUser;
use crate::core::models::role::Role;

use super::http::HttpRequest;

/// Read the signed-in staff member from the proxy-set headers.
///
/// A missing header, an unknown role, or a non-admin role all deny access.
pub fn current_user(req: &HttpRequest, identity: &IdentitySection) -> Result<CurrentUser> {
    let email = req
        .header(&identity.email_header)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AdminError::denied(format!("missing {} header", identity.email_header)))?;
    let role_raw = req
        .header(&identity.role_header)
        .ok_or_else(|| AdminError::denied(format!("missing {} header", identity.role_header)))?;
    let role: Role = role_raw
        .parse()
        .map_err(|e| AdminError::denied(format!("{e}")))?;
    if !role.is_admin() {
        return Err(AdminError::denied(format!("role '{role}' cannot use the admin tool")));
    }
    Ok(CurrentUser::new(email, role))
}
