use crate::core::errors::{AdminError, Result};
use crate::core::models::identity::CurrentUser;
use crate::core::models::user::{User, UserUpdate, split_timestamp};
use crate::core::traits::data_api::DataApiClient;

/// Account action offered on the user summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Unlock,
    Deactivate,
}

impl AccountAction {
    pub fn label(self) -> &'static str {
        match self {
            AccountAction::Unlock => "Unlock",
            AccountAction::Deactivate => "Deactivate",
        }
    }

    /// Last path segment of the action URL.
    pub fn slug(self) -> &'static str {
        match self {
            AccountAction::Unlock => "unlock",
            AccountAction::Deactivate => "deactivate",
        }
    }

    pub fn url(self, user_id: u64) -> String {
        format!("/admin/suppliers/users/{user_id}/{}", self.slug())
    }

    fn update(self) -> UserUpdate {
        match self {
            AccountAction::Unlock => UserUpdate::unlock(),
            AccountAction::Deactivate => UserUpdate::deactivate(),
        }
    }
}

/// Display-ready fields for a single looked-up account.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: u64,
    pub name: String,
    pub role: String,
    /// `(supplier name, supplier page URL)`, only for supplier accounts.
    pub supplier: Option<(String, String)>,
    pub last_login_time: String,
    pub last_login_day: String,
    pub password_changed_time: String,
    pub password_changed_day: String,
    pub locked: bool,
    pub action: AccountAction,
    /// Where the action form sends the browser back to.
    pub return_to: String,
}

impl UserSummary {
    fn from_user(user: &User, return_to: String) -> Self {
        let (last_login_time, last_login_day) = split_timestamp(user.logged_in_at.as_ref());
        let (password_changed_time, password_changed_day) =
            split_timestamp(user.password_changed_at.as_ref());
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role.clone(),
            supplier: user.supplier_link().map(|s| {
                (
                    s.name.clone(),
                    format!("/admin/suppliers?supplier_id={}", s.supplier_id),
                )
            }),
            last_login_time,
            last_login_day,
            password_changed_time,
            password_changed_day,
            locked: user.locked,
            action: if user.locked {
                AccountAction::Unlock
            } else {
                AccountAction::Deactivate
            },
            return_to,
        }
    }

    pub fn locked_label(&self) -> &'static str {
        if self.locked { "Yes" } else { "No" }
    }
}

/// The lookup URL for `email`, used as the action forms' return target.
pub fn lookup_url(email: &str) -> String {
    format!("/admin/users?email_address={}", urlencoding::encode(email))
}

/// Finds accounts by email and applies account actions.
pub struct UserLookupService<'a> {
    pub api: &'a dyn DataApiClient,
}

impl<'a> UserLookupService<'a> {
    /// Look up one account. A missing or blank email is treated the same
    /// as an email with no account: `NotFound`.
    pub fn lookup(&self, email: Option<&str>) -> Result<UserSummary> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AdminError::not_found("no email address given"))?;

        let user = self
            .api
            .get_user(email)?
            .ok_or_else(|| AdminError::not_found(format!("user {email}")))?;

        Ok(UserSummary::from_user(&user, lookup_url(email)))
    }

    pub fn apply(&self, user_id: u64, action: AccountAction, actor: &CurrentUser) -> Result<()> {
        self.api
            .update_user(user_id, &action.update(), &actor.email_address)?;
        tracing::info!(
            user_id,
            action = action.slug(),
            actor = %actor.email_address,
            "account action applied"
        );
        Ok(())
    }
}

/// Pick a safe redirect target from a submitted `source` field.
///
/// Only local admin paths are honoured; anything else falls back to
/// the empty lookup page.
pub fn safe_return_to(source: Option<&str>) -> String {
    match source {
        Some(s) if s.starts_with("/admin/") && !s.starts_with("//") => s.to_string(),
        _ => "/admin/users".to_string(),
    }
}
