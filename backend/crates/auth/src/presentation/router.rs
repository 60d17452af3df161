//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::AdminRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_admin;

/// Admin account routes, mounted under `/api/admin`
///
/// `register` and `login` are reachable without a session; `profile` and
/// `change-password` sit behind the bearer-token gate.
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: AdminRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/profile", get(handlers::profile::<R>))
        .route("/change-password", put(handlers::change_password::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
