//! Feedback Category

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{FeedbackError, FeedbackResult};

/// Kind of feedback a citizen submits. Fixed at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[display("complaint")]
    Complaint,
    #[display("compliment")]
    Compliment,
    #[display("suggestion")]
    Suggestion,
}

impl Category {
    /// Declaration order; analytics lists categories in this order
    pub const ALL: [Category; 3] = [
        Category::Complaint,
        Category::Compliment,
        Category::Suggestion,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Category::Complaint => "complaint",
            Category::Compliment => "compliment",
            Category::Suggestion => "suggestion",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Parse user input
    pub fn parse(input: &str) -> FeedbackResult<Self> {
        Self::from_code(input.trim()).ok_or_else(|| {
            FeedbackError::Validation(
                "Category must be one of: complaint, compliment, suggestion".into(),
            )
        })
    }
}
