//! Auth (Admin Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Admin registration (guarded after the first account) and email login
//! - Stateless HMAC-signed bearer tokens with a fixed lifetime
//! - Role capability table (`admin`, `supervisor`)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper, zeroized clear text
//! - Unknown email and wrong password are indistinguishable to the caller
//! - Token MACs verified in constant time before any field is trusted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::authorize;
pub use domain::entity::admin_account::AdminAccount;
pub use domain::repository::AdminRepository;
pub use domain::value_object::admin_role::{AdminRole, Capability};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAdminRepository;
pub use presentation::router::auth_router;
pub use presentation::{AuthAppState, CurrentAdmin, require_admin};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
