//! Route definitions for the PrivyCode HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(link_routes())
        .merge(viewer_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// OAuth and profile endpoints
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/github/login", get(handlers::auth::github_login))
        .route(
            "/auth/github/callback",
            get(handlers::auth::github_callback),
        )
        .route("/auth/me", get(handlers::user::me))
}

/// Owner-facing link management
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(handlers::link::list_links))
        .route("/links", post(handlers::link::create_link))
        .route("/links/{id}", get(handlers::link::get_link))
        .route("/links/{id}", put(handlers::link::update_link))
        .route("/links/{id}", delete(handlers::link::delete_link))
}

/// Public viewer endpoints (token-only)
fn viewer_routes() -> Router<AppState> {
    Router::new()
        .route("/view/{token}", get(handlers::viewer::resolve_link))
        .route(
            "/view/{token}/contents",
            get(handlers::viewer::list_contents),
        )
        .route("/view/{token}/raw", get(handlers::viewer::raw_file))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
