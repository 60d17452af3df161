//! Feedback Routers

use auth::{AdminRepository, AuthAppState, require_admin};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::{AnalyticsRepository, FeedbackRepository};
use crate::presentation::handlers::{self, FeedbackAppState};

/// Anonymous routes, mounted under `/api/feedback`
pub fn feedback_public_router<R>(state: FeedbackAppState<R>) -> Router
where
    R: FeedbackRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(handlers::submit::<R>))
        .route("/{tracking_id}", get(handlers::track::<R>))
        .with_state(state)
}

/// Admin routes, mounted under `/api/admin` next to the auth router
///
/// Every route sits behind the bearer-token gate built from `gate`; the
/// handlers then check the specific capability.
pub fn feedback_admin_router<R, A>(state: FeedbackAppState<R>, gate: AuthAppState<A>) -> Router
where
    R: FeedbackRepository + AnalyticsRepository + Send + Sync + 'static,
    A: AdminRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/feedback", get(handlers::list::<R>))
        .route("/feedback/{id}", put(handlers::update::<R>))
        .route("/analytics", get(handlers::analytics::<R>))
        .route_layer(middleware::from_fn_with_state(gate, require_admin::<A>))
        .with_state(state)
}
