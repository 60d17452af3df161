//! Domain Layer
//!
//! Contains entities, value objects, the listing filter, and repository traits.

pub mod entity;
pub mod filter;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::feedback::{Feedback, FeedbackUpdate, NewFeedback, TrackingStatus};
pub use filter::FeedbackFilter;
pub use repository::{AnalyticsRepository, FeedbackRepository};
