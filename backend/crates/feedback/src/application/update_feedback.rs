//! Update Feedback Use Case
//!
//! Status transition, department assignment and internal note in one
//! atomic store operation.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entity::feedback::{Feedback, FeedbackUpdate};
use crate::domain::repository::FeedbackRepository;
use crate::domain::value_object::{
    department::Department, feedback_id::FeedbackId, status::FeedbackStatus,
};
use crate::error::FeedbackResult;

#[derive(Debug, Default)]
pub struct UpdateFeedbackInput {
    pub status: Option<String>,
    pub department: Option<String>,
    pub note: Option<String>,
}

pub struct UpdateFeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateFeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        id: FeedbackId,
        input: UpdateFeedbackInput,
    ) -> FeedbackResult<Feedback> {
        // Validate everything before the store is touched
        let status = non_blank(input.status)
            .map(|s| FeedbackStatus::parse(&s))
            .transpose()?;
        let department = non_blank(input.department)
            .map(|d| Department::parse(&d))
            .transpose()?;
        let update = FeedbackUpdate::new(status, department, input.note)?;

        let updated = self
            .repo
            .update_with(id, move |feedback| Ok(feedback.apply(update, Utc::now())))
            .await?;

        tracing::info!(
            feedback_id = %updated.id,
            status = %updated.status,
            "Feedback updated"
        );

        Ok(updated)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
