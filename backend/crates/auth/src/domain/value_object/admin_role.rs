//! Admin Role and Capabilities
//!
//! Roles are a closed set. What a role may do is decided by one table
//! ([`AdminRole::capabilities`]) instead of role checks scattered over
//! handlers.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A single permitted operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Capability {
    #[display("view_own_profile")]
    ViewOwnProfile,
    #[display("change_own_password")]
    ChangeOwnPassword,
    #[display("list_feedback")]
    ListFeedback,
    #[display("update_feedback")]
    UpdateFeedback,
    #[display("view_analytics")]
    ViewAnalytics,
    #[display("register_admin")]
    RegisterAdmin,
}

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ViewOwnProfile,
    Capability::ChangeOwnPassword,
    Capability::ListFeedback,
    Capability::UpdateFeedback,
    Capability::ViewAnalytics,
    Capability::RegisterAdmin,
];

const SUPERVISOR_CAPABILITIES: &[Capability] =
    &[Capability::ViewOwnProfile, Capability::ChangeOwnPassword];

/// Admin account classification
///
/// Persisted as a `SMALLINT` id; exposed over HTTP as its code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum AdminRole {
    #[default]
    #[display("admin")]
    Admin = 1,
    #[display("supervisor")]
    Supervisor = 2,
}

impl AdminRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Supervisor => "supervisor",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(AdminRole::Admin),
            2 => Some(AdminRole::Supervisor),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "admin" => Some(AdminRole::Admin),
            "supervisor" => Some(AdminRole::Supervisor),
            _ => None,
        }
    }

    pub const fn capabilities(&self) -> &'static [Capability] {
        match self {
            AdminRole::Admin => ADMIN_CAPABILITIES,
            AdminRole::Supervisor => SUPERVISOR_CAPABILITIES,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}
