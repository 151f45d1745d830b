use super::role::Role;

/// The staff member making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub email_address: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn new(email_address: impl Into<String>, role: Role) -> Self {
        Self {
            email_address: email_address.into(),
            role,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
