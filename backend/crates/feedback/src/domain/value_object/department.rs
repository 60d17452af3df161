//! Government department a feedback item is routed to

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{FeedbackError, FeedbackResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    #[display("health")]
    Health,
    #[display("education")]
    Education,
    #[display("transport")]
    Transport,
    #[display("water")]
    Water,
    #[display("finance")]
    Finance,
    #[display("other")]
    Other,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Health,
        Department::Education,
        Department::Transport,
        Department::Water,
        Department::Finance,
        Department::Other,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Department::Health => "health",
            Department::Education => "education",
            Department::Transport => "transport",
            Department::Water => "water",
            Department::Finance => "finance",
            Department::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    pub fn parse(input: &str) -> FeedbackResult<Self> {
        Self::from_code(input.trim()).ok_or_else(|| {
            FeedbackError::Validation(
                "Department must be one of: health, education, transport, water, finance, other"
                    .into(),
            )
        })
    }
}
