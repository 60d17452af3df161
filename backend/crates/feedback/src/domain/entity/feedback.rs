//! Feedback Entity and Status State Machine

use chrono::{DateTime, Utc};

use crate::domain::entity::internal_note::InternalNote;
use crate::domain::value_object::{
    category::Category, department::Department, feedback_id::FeedbackId,
    message::FeedbackMessage, status::FeedbackStatus, tracking_id::TrackingId,
};
use crate::error::{FeedbackError, FeedbackResult};

/// One entry of the append-only status history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub from_status: FeedbackStatus,
    pub to_status: FeedbackStatus,
    pub changed_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// A submission not yet persisted; the store assigns its id
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub tracking_id: TrackingId,
    pub category: Category,
    pub message: FeedbackMessage,
    pub created_at: DateTime<Utc>,
}

impl NewFeedback {
    pub fn new(category: Category, message: FeedbackMessage) -> Self {
        Self {
            tracking_id: TrackingId::generate(),
            category,
            message,
            created_at: Utc::now(),
        }
    }

    /// Status of every fresh submission
    pub fn status(&self) -> FeedbackStatus {
        FeedbackStatus::Received
    }
}

/// What a citizen may see about their submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingStatus {
    pub tracking_id: TrackingId,
    pub status: FeedbackStatus,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

/// Full feedback record (admin view)
#[derive(Debug, Clone)]
pub struct Feedback {
    pub id: FeedbackId,
    pub tracking_id: TrackingId,
    pub category: Category,
    pub message: FeedbackMessage,
    pub status: FeedbackStatus,
    pub department: Option<Department>,
    /// Oldest first; never rewritten
    pub status_history: Vec<StatusChange>,
    /// Oldest first; never rewritten
    pub internal_notes: Vec<InternalNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated admin update. At least one field is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackUpdate {
    status: Option<FeedbackStatus>,
    department: Option<Department>,
    note: Option<String>,
}

impl FeedbackUpdate {
    /// Blank notes count as absent.
    pub fn new(
        status: Option<FeedbackStatus>,
        department: Option<Department>,
        note: Option<String>,
    ) -> FeedbackResult<Self> {
        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        if status.is_none() && department.is_none() && note.is_none() {
            return Err(FeedbackError::Validation(
                "Provide at least one of status, department or note".into(),
            ));
        }

        Ok(Self {
            status,
            department,
            note,
        })
    }

    pub fn status(&self) -> Option<FeedbackStatus> {
        self.status
    }
}

/// Changes produced by [`Feedback::apply`], for the store to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedUpdate {
    pub status_change: Option<StatusChange>,
    pub department: Option<Department>,
    /// Text of the internal note to append
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    pub fn tracking_status(&self) -> TrackingStatus {
        TrackingStatus {
            tracking_id: self.tracking_id,
            status: self.status,
            category: self.category,
            created_at: self.created_at,
        }
    }

    /// Move to `to` and append exactly one history entry.
    ///
    /// Any status may follow any status, including itself.
    pub fn transition(
        &mut self,
        to: FeedbackStatus,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> StatusChange {
        let change = StatusChange {
            from_status: self.status,
            to_status: to,
            changed_at: at,
            note,
        };
        self.status = to;
        self.updated_at = at;
        self.status_history.push(change.clone());
        change
    }

    /// Apply an admin update in memory. The note, if any, is both attached to
    /// the status change and appended as an internal note.
    pub fn apply(&mut self, update: FeedbackUpdate, at: DateTime<Utc>) -> AppliedUpdate {
        let status_change = update
            .status
            .map(|to| self.transition(to, update.note.clone(), at));

        if let Some(department) = update.department {
            self.department = Some(department);
        }

        if let Some(note) = &update.note {
            let next_id = self.internal_notes.last().map_or(1, |n| n.id + 1);
            self.internal_notes.push(InternalNote {
                id: next_id,
                note: note.clone(),
                created_at: at,
            });
        }

        self.updated_at = at;

        AppliedUpdate {
            status_change,
            department: update.department,
            note: update.note,
            updated_at: at,
        }
    }
}
