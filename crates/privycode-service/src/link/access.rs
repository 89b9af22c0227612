//! Access gate — decides whether a viewer token grants access.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use privycode_core::error::AppError;
use privycode_core::result::AppResult;
use privycode_database::{UserStore, ViewerLinkStore};
use privycode_entity::link::ViewerLink;

/// A granted evaluation: the caller may fetch content for `repo_name` with
/// the owner's `credential`.
#[derive(Debug, Clone)]
pub struct Grant {
    /// The link after its view was consumed.
    pub link: ViewerLink,
    /// GitHub login of the link's owner.
    pub github_username: String,
    /// Repository the link exposes.
    pub repo_name: String,
    /// The owner's current remote-service credential. Never leaves the
    /// process; it is only handed to the content proxy.
    pub credential: String,
}

/// Evaluates viewer tokens and consumes view quota on every grant.
///
/// The authorization decision is separate from content retrieval: a view is
/// consumed the moment access is granted, and a later fetch failure never
/// refunds it (view-attempt semantics, not view-success semantics).
#[derive(Debug, Clone)]
pub struct AccessGate {
    links: Arc<dyn ViewerLinkStore>,
    users: Arc<dyn UserStore>,
}

impl AccessGate {
    /// Creates a new access gate.
    pub fn new(links: Arc<dyn ViewerLinkStore>, users: Arc<dyn UserStore>) -> Self {
        Self { links, users }
    }

    /// Evaluate a token at `now`. On a grant the link's view count has
    /// already been durably consumed when this returns.
    pub async fn evaluate(&self, token: &str, now: DateTime<Utc>) -> AppResult<Grant> {
        let link = self
            .links
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Viewer link not found"))?;

        if link.is_expired(now) {
            return Err(AppError::link_expired("Viewer link has expired"));
        }
        if link.is_exhausted() {
            return Err(AppError::view_limit_exceeded(
                "Viewer link has reached its view limit",
            ));
        }

        // The store enforces the quota boundary atomically; losing the race
        // here means another request consumed the last view (or the link was
        // deleted or expired mid-flight), so re-read for the precise reason.
        let link = match self.links.increment_views_if_live(link.id, now).await? {
            Some(updated) => updated,
            None => return Err(self.denial_after_race(link.id, now).await),
        };

        debug!(
            link_id = %link.id,
            view_count = link.view_count,
            "Viewer link grant"
        );

        let owner = self
            .users
            .find_by_id(link.user_id)
            .await?
            .ok_or_else(|| AppError::internal("Viewer link owner is missing"))?;

        Ok(Grant {
            github_username: owner.github_username,
            repo_name: link.repo_name.clone(),
            credential: owner.github_token,
            link,
        })
    }

    async fn denial_after_race(&self, id: Uuid, now: DateTime<Utc>) -> AppError {
        match self.links.find_by_id(id).await {
            Ok(Some(link)) if link.is_expired(now) => {
                AppError::link_expired("Viewer link has expired")
            }
            Ok(Some(link)) if link.is_exhausted() => {
                AppError::view_limit_exceeded("Viewer link has reached its view limit")
            }
            Ok(Some(_)) => AppError::internal("View could not be consumed"),
            Ok(None) => AppError::not_found("Viewer link not found"),
            Err(err) => err,
        }
    }
}
