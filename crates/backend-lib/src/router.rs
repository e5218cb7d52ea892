// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router assembly.
use crate::handlers::{auth, funds, health};
use crate::middleware::require_auth;
use crate::AppState;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the API router.
///
/// Routes under the protected group run behind the session middleware;
/// everything else is public.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/funds/save", post(funds::save_fund))
        .route("/api/funds/saved", get(funds::list_saved))
        .route("/api/funds/saved/{scheme_code}", delete(funds::remove_saved))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_auth,
        ));

    Router::new()
        .route("/", get(health::root))
        .route("/api/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
