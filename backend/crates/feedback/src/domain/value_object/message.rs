//! Feedback Message Value Object

use std::fmt;

use crate::error::{FeedbackError, FeedbackResult};

/// Maximum message length in characters
pub const MESSAGE_MAX_LENGTH: usize = 5000;

/// Free-text body of a submission; non-blank, trimmed
#[derive(Clone, PartialEq, Eq)]
pub struct FeedbackMessage(String);

impl FeedbackMessage {
    pub fn new(message: impl Into<String>) -> FeedbackResult<Self> {
        let message = message.into();
        let trimmed = message.trim();

        if trimmed.is_empty() {
            return Err(FeedbackError::Validation("Message cannot be empty".into()));
        }

        if trimmed.chars().count() > MESSAGE_MAX_LENGTH {
            return Err(FeedbackError::Validation(format!(
                "Message must be at most {} characters",
                MESSAGE_MAX_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(message: String) -> Self {
        Self(message)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Citizen text stays out of logs
impl fmt::Debug for FeedbackMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedbackMessage({} chars)", self.0.chars().count())
    }
}
