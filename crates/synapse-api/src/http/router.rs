//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/` and require an `X-Owner-Id` header.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Turn submission
        .route("/turns", post(handlers::turn::submit_turn))
        // Active conversation state
        .route("/timeline", get(handlers::session::get_timeline))
        // Session list projection
        .route("/sessions", get(handlers::session::list_sessions))
        .route("/sessions/new", post(handlers::session::new_session))
        .route("/sessions/refresh", post(handlers::session::refresh_sessions))
        .route("/sessions/{id}/load", post(handlers::session::load_session))
        .route("/sessions/{id}", delete(handlers::session::delete_session))
        // Identity boundary
        .route("/signout", post(handlers::session::sign_out));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no identity required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
