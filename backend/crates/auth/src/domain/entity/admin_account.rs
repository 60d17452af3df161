//! Admin Account Entity

use chrono::{DateTime, Utc};
use kernel::id::AdminId;

use crate::domain::value_object::{
    admin_password::AdminPassword, admin_role::AdminRole, email::Email,
};

/// Admin account
///
/// The only authenticated principal in the system. Citizens submitting
/// feedback are never accounts.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub admin_id: AdminId,
    /// Unique, lower-cased login identifier
    pub email: Email,
    pub password: AdminPassword,
    pub role: AdminRole,
    /// Free-text department the admin belongs to
    pub department: Option<String>,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminAccount {
    pub fn new(email: Email, password: AdminPassword, role: AdminRole) -> Self {
        let now = Utc::now();

        Self {
            admin_id: AdminId::new(),
            email,
            password,
            role,
            department: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    pub fn set_password(&mut self, password: AdminPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }
}
