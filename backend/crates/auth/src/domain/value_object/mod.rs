//! Value Object Module

pub mod admin_password;
pub mod admin_role;
pub mod email;
