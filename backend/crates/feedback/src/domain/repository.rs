//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::analytics::AnalyticsSnapshot;
use crate::domain::entity::feedback::{AppliedUpdate, Feedback, NewFeedback, TrackingStatus};
use crate::domain::filter::FeedbackFilter;
use crate::domain::value_object::{feedback_id::FeedbackId, tracking_id::TrackingId};
use crate::error::FeedbackResult;

#[trait_variant::make(FeedbackRepository: Send)]
pub trait LocalFeedbackRepository {
    /// Persist a new submission in `received` with empty history
    async fn create(&self, feedback: &NewFeedback) -> FeedbackResult<Feedback>;

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> FeedbackResult<Option<TrackingStatus>>;

    /// Full records, newest first
    async fn list(&self, filter: &FeedbackFilter) -> FeedbackResult<Vec<Feedback>>;

    /// Load the record under a lock, let `apply` mutate it, and persist the
    /// produced changes in the same transaction.
    ///
    /// `FeedbackError::NotFound` if no record has this id. Nothing is written
    /// when `apply` fails.
    async fn update_with<F>(&self, id: FeedbackId, apply: F) -> FeedbackResult<Feedback>
    where
        F: FnOnce(&mut Feedback) -> FeedbackResult<AppliedUpdate> + Send;
}

#[trait_variant::make(AnalyticsRepository: Send)]
pub trait LocalAnalyticsRepository {
    /// All counts from one consistent read
    async fn snapshot(&self) -> FeedbackResult<AnalyticsSnapshot>;
}
