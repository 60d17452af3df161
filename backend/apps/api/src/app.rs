//! Router Assembly
//!
//! Mounts the context routers under `/api` and wraps them in the shared
//! HTTP layers.

use auth::{AdminRepository, AuthAppState, AuthConfig, auth_router};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Json, Router, routing::get};
use feedback::{
    AnalyticsRepository, FeedbackAppState, FeedbackRepository, feedback_admin_router,
    feedback_public_router,
};
use kernel::error::app_error::AppError;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Settings for the outer HTTP layers
pub struct HttpSettings {
    pub frontend_origins: Vec<String>,
    pub request_timeout: Duration,
}

pub fn build_router<F, A>(
    feedback_repo: Arc<F>,
    admin_repo: Arc<A>,
    auth_config: Arc<AuthConfig>,
    http: &HttpSettings,
) -> Router
where
    F: FeedbackRepository + AnalyticsRepository + Send + Sync + 'static,
    A: AdminRepository + Send + Sync + 'static,
{
    let gate = AuthAppState::new(admin_repo, auth_config);
    let feedback_state = FeedbackAppState::new(feedback_repo);

    let admin = auth_router(gate.clone()).merge(feedback_admin_router(feedback_state.clone(), gate));

    Router::new()
        .route("/", get(banner))
        .route("/api/health", get(health))
        .nest("/api/feedback", feedback_public_router(feedback_state))
        .nest("/api/admin", admin)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&http.frontend_origins))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    http.request_timeout,
                )),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]))
}

/// GET /
async fn banner() -> Json<Value> {
    Json(json!({
        "status": "running",
        "message": "Citizen Feedback API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Any unmatched path
async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}
