//! Feedback Status
//!
//! Every status may follow every other, including itself. The only rule is
//! membership in this set.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{FeedbackError, FeedbackResult};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    /// Initial status of every submission
    #[default]
    #[display("received")]
    Received,
    #[display("acknowledged")]
    Acknowledged,
    #[display("under_investigation")]
    UnderInvestigation,
    #[display("resolved")]
    Resolved,
    #[display("closed")]
    Closed,
}

impl FeedbackStatus {
    /// Declaration order; analytics lists statuses in this order
    pub const ALL: [FeedbackStatus; 5] = [
        FeedbackStatus::Received,
        FeedbackStatus::Acknowledged,
        FeedbackStatus::UnderInvestigation,
        FeedbackStatus::Resolved,
        FeedbackStatus::Closed,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            FeedbackStatus::Received => "received",
            FeedbackStatus::Acknowledged => "acknowledged",
            FeedbackStatus::UnderInvestigation => "under_investigation",
            FeedbackStatus::Resolved => "resolved",
            FeedbackStatus::Closed => "closed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Parse user input
    pub fn parse(input: &str) -> FeedbackResult<Self> {
        Self::from_code(input.trim()).ok_or_else(|| {
            FeedbackError::Validation(
                "Status must be one of: received, acknowledged, under_investigation, resolved, closed"
                    .into(),
            )
        })
    }
}
