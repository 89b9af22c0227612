//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use privycode_entity::link::ViewerLink;
use privycode_service::link::IssuedLink;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A viewer link as returned to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResponse {
    /// Link ID.
    pub id: Uuid,
    /// Repository name.
    pub repo_name: String,
    /// Link token.
    pub token: String,
    /// Shareable URL embedding the token.
    pub viewer_url: String,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// View cap (0 = unlimited).
    pub max_views: i32,
    /// Views consumed so far.
    pub view_count: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Build a response from a link and the URL assembler.
    pub fn from_link(link: ViewerLink, viewer_url: String) -> Self {
        Self {
            id: link.id,
            repo_name: link.repo_name,
            token: link.token,
            viewer_url,
            expires_at: link.expires_at,
            max_views: link.max_views,
            view_count: link.view_count,
            created_at: link.created_at,
        }
    }
}

impl From<IssuedLink> for LinkResponse {
    fn from(issued: IssuedLink) -> Self {
        Self::from_link(issued.link, issued.viewer_url)
    }
}

/// Authenticated owner profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// GitHub login.
    pub github_username: String,
    /// Email address.
    pub email: String,
}

/// Link metadata shown to anonymous viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerInfoResponse {
    /// GitHub login of the repository owner.
    pub github_username: String,
    /// Repository name.
    pub repo_name: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
