//! Feedback Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, listing filter, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Anonymous submission answered with an opaque tracking id
//! - Public status lookup by tracking id (never the message)
//! - Admin listing with typed filters, status transitions with an
//!   append-only history, internal notes, department routing
//! - Snapshot-consistent analytics by category, status and month
//!
//! Admin routes reuse the bearer-token gate and capability table of the
//! `auth` crate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entity::feedback::{Feedback, TrackingStatus};
pub use domain::filter::FeedbackFilter;
pub use domain::repository::{AnalyticsRepository, FeedbackRepository};
pub use domain::value_object::{
    category::Category, department::Department, status::FeedbackStatus,
    tracking_id::TrackingId,
};
pub use error::{FeedbackError, FeedbackResult};
pub use infra::postgres::PgFeedbackRepository;
pub use presentation::{FeedbackAppState, feedback_admin_router, feedback_public_router};
