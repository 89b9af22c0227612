//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use privycode_core::config::AppConfig;
use privycode_core::traits::ContentHost;
use privycode_database::{UserStore, ViewerLinkStore};
use privycode_github::GitHubOAuth;
use privycode_service::link::{AccessGate, LinkService};
use privycode_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks. The stores
/// and the content host are trait objects so the whole HTTP surface can run
/// against the in-memory implementations in tests.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Stores & collaborators ───────────────────────────────
    /// Owner store (session authenticator lookup)
    pub users: Arc<dyn UserStore>,
    /// Viewer link store
    pub links: Arc<dyn ViewerLinkStore>,
    /// Remote content proxy
    pub content: Arc<dyn ContentHost>,
    /// GitHub OAuth client
    pub oauth: Arc<GitHubOAuth>,

    // ── Services ─────────────────────────────────────────────
    /// Owner account service
    pub user_service: Arc<UserService>,
    /// Link registry
    pub link_service: Arc<LinkService>,
    /// Access gate
    pub access_gate: Arc<AccessGate>,
}
