//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod change_password;
pub mod config;
pub mod get_profile;
pub mod register;
pub mod session;
pub mod sign_in;
pub mod verify_session;

// Re-exports
pub use authorize::authorize;
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use get_profile::GetProfileUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use session::{IssuedSession, SessionClaims, SessionIssuer};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use verify_session::VerifySessionUseCase;
