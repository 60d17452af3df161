//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::value_object::admin_role::AdminRole;

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Missing fields deserialize as empty and fail domain validation with a
/// readable message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAdmin {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

impl From<&AdminAccount> for RegisteredAdmin {
    fn from(admin: &AdminAccount) -> Self {
        Self {
            id: *admin.admin_id.as_uuid(),
            email: admin.email.to_string(),
            role: admin.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub admin: RegisteredAdmin,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedInAdmin {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
    pub department: Option<String>,
}

impl From<&AdminAccount> for SignedInAdmin {
    fn from(admin: &AdminAccount) -> Self {
        Self {
            id: *admin.admin_id.as_uuid(),
            email: admin.email.to_string(),
            role: admin.role,
            department: admin.department.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub expires_at_ms: i64,
    pub admin: SignedInAdmin,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
    pub department: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&AdminAccount> for AdminProfile {
    fn from(admin: &AdminAccount) -> Self {
        Self {
            id: *admin.admin_id.as_uuid(),
            email: admin.email.to_string(),
            role: admin.role,
            department: admin.department.clone(),
            last_login: admin.last_login_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub success: bool,
    pub admin: AdminProfile,
}

// ============================================================================
// Change Password
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// `{success, message}` acknowledgement
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
