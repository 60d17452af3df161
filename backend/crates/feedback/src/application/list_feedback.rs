//! List Feedback Use Case

use std::sync::Arc;

use crate::domain::entity::feedback::Feedback;
use crate::domain::filter::FeedbackFilter;
use crate::domain::repository::FeedbackRepository;
use crate::error::FeedbackResult;

/// Raw query values as received
#[derive(Debug, Default)]
pub struct ListFeedbackInput {
    pub category: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub struct ListFeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    repo: Arc<R>,
}

impl<R> ListFeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ListFeedbackInput) -> FeedbackResult<Vec<Feedback>> {
        let filter = FeedbackFilter::parse(
            input.category.as_deref(),
            input.status.as_deref(),
            input.start_date.as_deref(),
            input.end_date.as_deref(),
        )?;

        let records = self.repo.list(&filter).await?;
        tracing::debug!(count = records.len(), "Feedback listed");
        Ok(records)
    }
}
