use crate::core::errors::{AdminError, Result};
use crate::core::models::identity::CurrentUser;
use crate::core::models::role::Role;

pub const ADMIN_INDEX_ROLES: &[Role] = &[
    Role::Admin,
    Role::AdminCcsCategory,
    Role::AdminCcsSourcing,
    Role::AdminManager,
    Role::AdminFrameworkManager,
];
pub const SERVICE_MODERATION_ROLES: &[Role] = &[Role::AdminCcsCategory];
pub const USER_LOOKUP_ROLES: &[Role] = &[Role::Admin, Role::AdminCcsCategory];
pub const FRAMEWORK_USERS_ROLES: &[Role] = &[Role::AdminFrameworkManager];
/// Admins are further restricted to the research-participant export.
pub const SUPPLIER_EXPORT_ROLES: &[Role] = &[Role::AdminFrameworkManager, Role::Admin];
pub const BUYER_EXPORT_ROLES: &[Role] = &[Role::Admin, Role::AdminFrameworkManager];
pub const RESEARCH_HUB_ROLES: &[Role] = &[Role::Admin];

/// Whether `role` is one of `required`.
pub fn allowed(role: Role, required: &[Role]) -> bool {
    required.contains(&role)
}

/// Fail with `AccessDenied` unless the user holds one of `required`.
pub fn ensure_any_role(user: &CurrentUser, required: &[Role]) -> Result<()> {
    if allowed(user.role, required) {
        Ok(())
    } else {
        Err(AdminError::denied(format!(
            "role '{}' is not one of [{}]",
            user.role,
            required
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}
