//! Feedback Analytics Use Case

use std::sync::Arc;

use crate::domain::entity::analytics::FeedbackAnalytics;
use crate::domain::repository::AnalyticsRepository;
use crate::error::FeedbackResult;

pub struct FeedbackAnalyticsUseCase<R>
where
    R: AnalyticsRepository,
{
    repo: Arc<R>,
}

impl<R> FeedbackAnalyticsUseCase<R>
where
    R: AnalyticsRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> FeedbackResult<FeedbackAnalytics> {
        let snapshot = self.repo.snapshot().await?;
        Ok(FeedbackAnalytics::from(snapshot))
    }
}
