//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::analytics::FeedbackAnalytics;
use crate::domain::entity::feedback::{Feedback, StatusChange, TrackingStatus};
use crate::domain::entity::internal_note::InternalNote;
use crate::domain::value_object::{
    category::Category, department::Department, feedback_id::FeedbackId,
    status::FeedbackStatus, tracking_id::TrackingId,
};

// ============================================================================
// Submit
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub category: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackResponse {
    pub success: bool,
    pub tracking_id: TrackingId,
    pub message: String,
}

// ============================================================================
// Tracking
// ============================================================================

/// Public view; never carries the message or admin fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub tracking_id: TrackingId,
    pub status: FeedbackStatus,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl From<TrackingStatus> for TrackingResponse {
    fn from(status: TrackingStatus) -> Self {
        Self {
            tracking_id: status.tracking_id,
            status: status.status,
            category: status.category,
            created_at: status.created_at,
        }
    }
}

// ============================================================================
// Admin Listing
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFeedbackQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeDto {
    pub from_status: FeedbackStatus,
    pub to_status: FeedbackStatus,
    pub changed_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl From<&StatusChange> for StatusChangeDto {
    fn from(change: &StatusChange) -> Self {
        Self {
            from_status: change.from_status,
            to_status: change.to_status,
            changed_at: change.changed_at,
            note: change.note.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalNoteDto {
    pub id: i64,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl From<&InternalNote> for InternalNoteDto {
    fn from(note: &InternalNote) -> Self {
        Self {
            id: note.id,
            note: note.note.clone(),
            created_at: note.created_at,
        }
    }
}

/// Full record as admins see it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecordDto {
    pub id: FeedbackId,
    pub tracking_id: TrackingId,
    pub category: Category,
    pub message: String,
    pub status: FeedbackStatus,
    pub department: Option<Department>,
    pub status_history: Vec<StatusChangeDto>,
    pub internal_notes: Vec<InternalNoteDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Feedback> for FeedbackRecordDto {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id,
            tracking_id: feedback.tracking_id,
            category: feedback.category,
            message: feedback.message.as_str().to_string(),
            status: feedback.status,
            department: feedback.department,
            status_history: feedback.status_history.iter().map(Into::into).collect(),
            internal_notes: feedback.internal_notes.iter().map(Into::into).collect(),
            created_at: feedback.created_at,
            updated_at: feedback.updated_at,
        }
    }
}

// ============================================================================
// Admin Update
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackRequest {
    pub status: Option<String>,
    pub department: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatDto {
    pub category: Category,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStatDto {
    pub status: FeedbackStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendDto {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_count: i64,
    pub category_stats: Vec<CategoryStatDto>,
    pub status_stats: Vec<StatusStatDto>,
    pub monthly_trends: Vec<MonthlyTrendDto>,
}

impl From<FeedbackAnalytics> for AnalyticsResponse {
    fn from(analytics: FeedbackAnalytics) -> Self {
        Self {
            total_count: analytics.total_count,
            category_stats: analytics
                .category_stats
                .into_iter()
                .map(|c| CategoryStatDto {
                    category: c.category,
                    count: c.count,
                })
                .collect(),
            status_stats: analytics
                .status_stats
                .into_iter()
                .map(|s| StatusStatDto {
                    status: s.status,
                    count: s.count,
                })
                .collect(),
            monthly_trends: analytics
                .monthly_trends
                .into_iter()
                .map(|m| MonthlyTrendDto {
                    month: m.month,
                    count: m.count,
                })
                .collect(),
        }
    }
}
