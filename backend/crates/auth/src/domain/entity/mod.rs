//! Entity Module

pub mod admin_account;
