//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::FeedbackAppState;
pub use router::{feedback_admin_router, feedback_public_router};
