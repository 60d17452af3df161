//! Track Feedback Use Case

use std::sync::Arc;

use crate::domain::entity::feedback::TrackingStatus;
use crate::domain::repository::FeedbackRepository;
use crate::domain::value_object::tracking_id::TrackingId;
use crate::error::{FeedbackError, FeedbackResult};

pub struct TrackFeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    repo: Arc<R>,
}

impl<R> TrackFeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A malformed tracking id is indistinguishable from an unknown one.
    pub async fn execute(&self, tracking_id: &str) -> FeedbackResult<TrackingStatus> {
        let tracking_id = TrackingId::parse(tracking_id.trim()).ok_or(FeedbackError::NotFound)?;

        self.repo
            .find_by_tracking_id(&tracking_id)
            .await?
            .ok_or(FeedbackError::NotFound)
    }
}
