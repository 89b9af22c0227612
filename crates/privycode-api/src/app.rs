//! Application builder — wires stores, collaborators, services, and the
//! router into a running Axum server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use privycode_core::config::AppConfig;
use privycode_core::error::AppError;
use privycode_database::repositories::{UserRepository, ViewerLinkRepository};
use privycode_github::{GitHubContentClient, GitHubOAuth};
use privycode_service::link::{AccessGate, LinkService};
use privycode_service::user::UserService;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application for the given state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Wire all dependencies over a PostgreSQL pool into an `AppState`.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    let users = Arc::new(UserRepository::new(db_pool.clone()));
    let links = Arc::new(ViewerLinkRepository::new(db_pool));

    let oauth = Arc::new(GitHubOAuth::new(&config.github)?);
    let content = Arc::new(GitHubContentClient::new(&config.github)?);

    let user_service = Arc::new(UserService::new(users.clone()));
    let link_service = Arc::new(LinkService::new(
        links.clone(),
        content.clone(),
        config.links.clone(),
        config.server.public_url.clone(),
    ));
    let access_gate = Arc::new(AccessGate::new(links.clone(), users.clone()));

    Ok(AppState {
        config: Arc::new(config),
        users,
        links,
        content,
        oauth,
        user_service,
        link_service,
        access_gate,
    })
}

/// Runs the PrivyCode server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, db_pool)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("PrivyCode server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
