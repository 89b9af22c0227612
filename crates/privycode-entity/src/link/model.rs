//! Viewer link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use privycode_core::types::ViewLimit;

/// A capability granting time- and count-bounded read access to one
/// repository on behalf of its owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ViewerLink {
    /// Unique link identifier.
    pub id: Uuid,
    /// Owning user. Immutable after creation; the owner's deletion
    /// cascades to this row.
    pub user_id: Uuid,
    /// Repository the link exposes.
    pub repo_name: String,
    /// Opaque unguessable token (unique across all links).
    pub token: String,
    /// When the link stops granting access.
    pub expires_at: DateTime<Utc>,
    /// Maximum number of grants (0 = unlimited).
    pub max_views: i32,
    /// Number of grants consumed so far. Monotonically non-decreasing;
    /// only the access gate's grant path increments it.
    pub view_count: i32,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ViewerLink {
    /// Resolved view quota.
    pub fn view_limit(&self) -> ViewLimit {
        ViewLimit::from(self.max_views)
    }

    /// Whether the link's expiry time has passed. The boundary instant
    /// itself is expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the view quota is exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.view_limit().is_exhausted_by(self.view_count)
    }

    /// Whether the link currently grants access.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.deleted_at.is_none() && !self.is_expired(now) && !self.is_exhausted()
    }
}

/// Data required to create a new viewer link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateViewerLink {
    /// Owning user.
    pub user_id: Uuid,
    /// Repository name.
    pub repo_name: String,
    /// Generated token.
    pub token: String,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// View cap (0 = unlimited).
    pub max_views: i32,
}

/// Owner-initiated mutation of an existing link.
///
/// `expires_at`, when present, is a fresh window computed from the time of
/// the update. `max_views` replaces the cap without touching `view_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateViewerLink {
    /// New expiry time, if the TTL is being reset.
    pub expires_at: Option<DateTime<Utc>>,
    /// New view cap, if the quota is being replaced.
    pub max_views: Option<i32>,
}
