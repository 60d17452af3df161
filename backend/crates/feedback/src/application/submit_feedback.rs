//! Submit Feedback Use Case

use std::sync::Arc;

use crate::domain::entity::feedback::NewFeedback;
use crate::domain::repository::FeedbackRepository;
use crate::domain::value_object::{
    category::Category, message::FeedbackMessage, tracking_id::TrackingId,
};
use crate::error::{FeedbackError, FeedbackResult};

pub struct SubmitFeedbackInput {
    pub category: Option<String>,
    pub message: Option<String>,
}

pub struct SubmitFeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitFeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns only the tracking id; the submitter gets nothing else.
    pub async fn execute(&self, input: SubmitFeedbackInput) -> FeedbackResult<TrackingId> {
        let (Some(category), Some(message)) = (
            input.category.filter(|c| !c.trim().is_empty()),
            input.message.filter(|m| !m.trim().is_empty()),
        ) else {
            return Err(FeedbackError::Validation(
                "Please provide category and message".into(),
            ));
        };

        let category = Category::parse(&category)?;
        let message = FeedbackMessage::new(message)?;

        let created = self.repo.create(&NewFeedback::new(category, message)).await?;

        tracing::info!(
            feedback_id = %created.id,
            category = %created.category,
            "Feedback submitted"
        );

        Ok(created.tracking_id)
    }
}
