//! HTTP Handlers

use auth::{Capability, CurrentAdmin, authorize};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use std::sync::Arc;

use crate::application::{
    FeedbackAnalyticsUseCase, ListFeedbackInput, ListFeedbackUseCase, SubmitFeedbackInput,
    SubmitFeedbackUseCase, TrackFeedbackUseCase, UpdateFeedbackInput, UpdateFeedbackUseCase,
};
use crate::domain::repository::{AnalyticsRepository, FeedbackRepository};
use crate::domain::value_object::feedback_id::FeedbackId;
use crate::error::{FeedbackError, FeedbackResult};
use crate::presentation::dto::{
    AnalyticsResponse, FeedbackRecordDto, ListFeedbackQuery, SubmitFeedbackRequest,
    SubmitFeedbackResponse, TrackingResponse, UpdateFeedbackRequest, UpdateFeedbackResponse,
};

/// Shared state for feedback handlers
pub struct FeedbackAppState<R> {
    pub repo: Arc<R>,
}

impl<R> FeedbackAppState<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> Clone for FeedbackAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Public
// ============================================================================

/// POST /api/feedback
///
/// Anonymous. No client address or user agent is read.
pub async fn submit<R>(
    State(state): State<FeedbackAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<SubmitFeedbackRequest>, FeedbackError>,
) -> FeedbackResult<impl IntoResponse>
where
    R: FeedbackRepository + Send + Sync + 'static,
{
    let tracking_id = SubmitFeedbackUseCase::new(state.repo.clone())
        .execute(SubmitFeedbackInput {
            category: req.category,
            message: req.message,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitFeedbackResponse {
            success: true,
            tracking_id,
            message: "Feedback submitted successfully".to_string(),
        }),
    ))
}

/// GET /api/feedback/{tracking_id}
pub async fn track<R>(
    State(state): State<FeedbackAppState<R>>,
    Path(tracking_id): Path<String>,
) -> FeedbackResult<Json<TrackingResponse>>
where
    R: FeedbackRepository + Send + Sync + 'static,
{
    let status = TrackFeedbackUseCase::new(state.repo.clone())
        .execute(&tracking_id)
        .await?;

    Ok(Json(status.into()))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/feedback
pub async fn list<R>(
    State(state): State<FeedbackAppState<R>>,
    CurrentAdmin(admin): CurrentAdmin,
    WithRejection(Query(query), _): WithRejection<Query<ListFeedbackQuery>, FeedbackError>,
) -> FeedbackResult<Json<Vec<FeedbackRecordDto>>>
where
    R: FeedbackRepository + Send + Sync + 'static,
{
    authorize(&admin, Capability::ListFeedback)?;

    let records = ListFeedbackUseCase::new(state.repo.clone())
        .execute(ListFeedbackInput {
            category: query.category,
            status: query.status,
            start_date: query.start_date,
            end_date: query.end_date,
        })
        .await?;

    Ok(Json(records.iter().map(FeedbackRecordDto::from).collect()))
}

/// PUT /api/admin/feedback/{id}
pub async fn update<R>(
    State(state): State<FeedbackAppState<R>>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<String>,
    body: Result<Json<UpdateFeedbackRequest>, JsonRejection>,
) -> FeedbackResult<Json<UpdateFeedbackResponse>>
where
    R: FeedbackRepository + Send + Sync + 'static,
{
    // Capability before body so a supervisor always gets 403
    authorize(&admin, Capability::UpdateFeedback)?;

    let Json(req) = body?;
    let id = FeedbackId::parse(&id).ok_or(FeedbackError::NotFound)?;

    UpdateFeedbackUseCase::new(state.repo.clone())
        .execute(
            id,
            UpdateFeedbackInput {
                status: req.status,
                department: req.department,
                note: req.note,
            },
        )
        .await?;

    tracing::info!(admin_id = %admin.admin_id, feedback_id = %id, "Admin updated feedback");

    Ok(Json(UpdateFeedbackResponse {
        success: true,
        message: "Feedback updated successfully".to_string(),
    }))
}

/// GET /api/admin/analytics
pub async fn analytics<R>(
    State(state): State<FeedbackAppState<R>>,
    CurrentAdmin(admin): CurrentAdmin,
) -> FeedbackResult<Json<AnalyticsResponse>>
where
    R: AnalyticsRepository + Send + Sync + 'static,
{
    authorize(&admin, Capability::ViewAnalytics)?;

    let analytics = FeedbackAnalyticsUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(analytics.into()))
}
