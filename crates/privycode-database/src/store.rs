//! Store traits for the persistence layer.
//!
//! The access gate and link registry depend on these traits rather than on
//! a concrete database, so quota semantics can be tested against the
//! in-memory implementation in [`crate::memory`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use privycode_core::result::AppResult;
use privycode_core::types::{PageRequest, PageResponse};
use privycode_entity::link::{CreateViewerLink, UpdateViewerLink, ViewerLink};
use privycode_entity::user::{CreateUser, User};

/// Store for repository owners.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by GitHub login.
    async fn find_by_github_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by exact credential match. This is the session
    /// authenticator's lookup: the credential *is* the session.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<User>>;

    /// Create a new user.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Overwrite the stored credential for a user (re-authentication).
    async fn update_token(&self, id: Uuid, github_token: &str) -> AppResult<User>;

    /// Delete a user. The core never calls this on its own; links owned by
    /// the user are removed with it (cascade). Returns `true` if deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Store for viewer links.
///
/// Every lookup filters out soft-deleted rows; a deleted link is
/// indistinguishable from one that never existed.
#[async_trait]
pub trait ViewerLinkStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a link by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ViewerLink>>;

    /// Find a link by its token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<ViewerLink>>;

    /// List links owned by a user, newest first.
    async fn find_by_owner(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ViewerLink>>;

    /// Persist a new link. Fails with `Conflict` when the token collides
    /// with an existing one (unique index, not an application-level check).
    async fn create(&self, data: &CreateViewerLink) -> AppResult<ViewerLink>;

    /// Apply an owner-initiated update. Returns `None` for an unknown or
    /// deleted link.
    async fn update(&self, id: Uuid, changes: &UpdateViewerLink) -> AppResult<Option<ViewerLink>>;

    /// Soft-delete a link. Returns `true` if a live link was deleted.
    async fn soft_delete(&self, id: Uuid) -> AppResult<bool>;

    /// Atomically consume one view if the link is live at `now`:
    /// increment-if-below-limit in a single store operation.
    ///
    /// Returns the updated link on a grant, `None` when the link is
    /// missing, deleted, expired, or exhausted — the caller re-reads to
    /// distinguish the reasons.
    async fn increment_views_if_live(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ViewerLink>>;
}
