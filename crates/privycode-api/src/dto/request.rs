//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create viewer link request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Repository to expose.
    #[validate(length(min = 1, message = "Repository name is required"))]
    pub repo_name: String,
    /// Expiry in days (defaults to 3 when absent or non-positive).
    pub expires_in_days: Option<i64>,
    /// View cap (unlimited when absent or non-positive).
    pub max_views: Option<i32>,
}

/// Update viewer link request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLinkRequest {
    /// New TTL in days; resets the expiry to a fresh window.
    pub expires_in_days: Option<i64>,
    /// New view cap; does not reset the consumed count.
    pub max_views: Option<i32>,
}

/// Query parameters of viewer content routes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerPathQuery {
    /// Path within the repository (root when absent).
    #[serde(default)]
    pub path: Option<String>,
}

/// Query parameters of the OAuth callback.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OAuthCallbackQuery {
    /// Authorization code handed back by GitHub.
    #[serde(default)]
    pub code: Option<String>,
    /// Echoed CSRF state.
    #[serde(default)]
    pub state: Option<String>,
}
