//! Link registry — owns the viewer link lifecycle.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use privycode_core::config::links::LinkConfig;
use privycode_core::error::{AppError, ErrorKind};
use privycode_core::result::AppResult;
use privycode_core::traits::ContentHost;
use privycode_core::types::{PageRequest, PageResponse};
use privycode_database::ViewerLinkStore;
use privycode_entity::link::{CreateViewerLink, LinkToken, UpdateViewerLink, ViewerLink};

use crate::context::RequestContext;

/// Parameters for creating a viewer link.
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Repository to expose.
    pub repo_name: String,
    /// Expiry in days; `None` or `<= 0` falls back to the configured default.
    pub expires_in_days: Option<i64>,
    /// View cap; `None` or `<= 0` means unlimited.
    pub max_views: Option<i32>,
}

/// Parameters for an owner-initiated link update.
#[derive(Debug, Clone)]
pub struct UpdateLinkRequest {
    /// New TTL in days; `> 0` resets the expiry to a fresh window from now.
    pub expires_in_days: Option<i64>,
    /// New view cap; `> 0` replaces the cap without resetting the count.
    pub max_views: Option<i32>,
}

/// A freshly created link together with its shareable URL.
#[derive(Debug, Clone)]
pub struct IssuedLink {
    /// The persisted link.
    pub link: ViewerLink,
    /// Shareable URL embedding the token.
    pub viewer_url: String,
}

/// Owns creation, mutation, and deletion of viewer links.
#[derive(Debug, Clone)]
pub struct LinkService {
    links: Arc<dyn ViewerLinkStore>,
    content: Arc<dyn ContentHost>,
    config: LinkConfig,
    public_url: String,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        links: Arc<dyn ViewerLinkStore>,
        content: Arc<dyn ContentHost>,
        config: LinkConfig,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            links,
            content,
            config,
            public_url: public_url.into(),
        }
    }

    /// Create a viewer link for one of the owner's repositories.
    ///
    /// The repository must be reachable with the owner's credential before
    /// anything is persisted; a link that cannot serve content is never
    /// created.
    pub async fn create_link(
        &self,
        ctx: &RequestContext,
        request: CreateLinkRequest,
    ) -> AppResult<IssuedLink> {
        let repo_name = request.repo_name.trim();
        if repo_name.is_empty() {
            return Err(AppError::validation("Repository name is required"));
        }

        let reachable = self
            .content
            .check_repo_exists(ctx.credential(), &ctx.github_username, repo_name)
            .await
            .unwrap_or(false);
        if !reachable {
            return Err(AppError::repository_unreachable(format!(
                "Repository '{}/{repo_name}' not found or inaccessible",
                ctx.github_username
            )));
        }

        let ttl_days = request
            .expires_in_days
            .filter(|days| *days > 0)
            .unwrap_or(self.config.default_ttl_days);
        let max_views = request.max_views.filter(|views| *views > 0).unwrap_or(0);
        let expires_at = Utc::now() + Duration::days(ttl_days);

        // Token uniqueness is enforced by the store's unique index; a
        // collision is retried with a fresh token, never surfaced.
        let mut attempts = self.config.token_create_attempts.max(1);
        let link = loop {
            let create = CreateViewerLink {
                user_id: ctx.user_id,
                repo_name: repo_name.to_string(),
                token: LinkToken::generate().into(),
                expires_at,
                max_views,
            };
            match self.links.create(&create).await {
                Ok(link) => break link,
                Err(err) if err.kind == ErrorKind::Conflict && attempts > 1 => {
                    attempts -= 1;
                    warn!("Viewer link token collision, retrying with a fresh token");
                }
                Err(err) if err.kind == ErrorKind::Conflict => {
                    return Err(AppError::internal(
                        "Exhausted viewer link token generation attempts",
                    ));
                }
                Err(err) => return Err(err),
            }
        };

        info!(
            link_id = %link.id,
            repo = %link.repo_name,
            ttl_days,
            max_views,
            "Created viewer link"
        );
        Ok(IssuedLink {
            viewer_url: self.viewer_url(&link.token),
            link,
        })
    }

    /// Fetch one of the owner's links.
    pub async fn get_link(&self, ctx: &RequestContext, id: Uuid) -> AppResult<ViewerLink> {
        let link = self
            .links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Viewer link not found"))?;
        self.ensure_owner(ctx, &link)?;
        Ok(link)
    }

    /// Update expiry and/or view cap of one of the owner's links.
    ///
    /// A new TTL starts a fresh window from now rather than extending the
    /// old expiry. A new cap leaves the consumed count untouched.
    pub async fn update_link(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: UpdateLinkRequest,
    ) -> AppResult<ViewerLink> {
        // Ownership is checked before anything is written.
        self.get_link(ctx, id).await?;

        let changes = UpdateViewerLink {
            expires_at: request
                .expires_in_days
                .filter(|days| *days > 0)
                .map(|days| Utc::now() + Duration::days(days)),
            max_views: request.max_views.filter(|views| *views > 0),
        };

        self.links
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Viewer link not found"))
    }

    /// Soft-delete one of the owner's links.
    pub async fn delete_link(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.get_link(ctx, id).await?;

        if !self.links.soft_delete(id).await? {
            return Err(AppError::not_found("Viewer link not found"));
        }
        info!(link_id = %id, "Deleted viewer link");
        Ok(())
    }

    /// List the owner's links, newest first.
    pub async fn list_links(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ViewerLink>> {
        self.links.find_by_owner(ctx.user_id, page).await
    }

    /// Shareable URL for a token.
    pub fn viewer_url(&self, token: &str) -> String {
        format!("{}/api/view/{token}", self.public_url)
    }

    fn ensure_owner(&self, ctx: &RequestContext, link: &ViewerLink) -> AppResult<()> {
        if link.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Viewer link belongs to another user",
            ));
        }
        Ok(())
    }
}
