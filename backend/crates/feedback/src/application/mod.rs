//! Application Layer
//!
//! Use cases and application services.

pub mod analytics;
pub mod list_feedback;
pub mod submit_feedback;
pub mod track_feedback;
pub mod update_feedback;

// Re-exports
pub use analytics::FeedbackAnalyticsUseCase;
pub use list_feedback::{ListFeedbackInput, ListFeedbackUseCase};
pub use submit_feedback::{SubmitFeedbackInput, SubmitFeedbackUseCase};
pub use track_feedback::TrackFeedbackUseCase;
pub use update_feedback::{UpdateFeedbackInput, UpdateFeedbackUseCase};
