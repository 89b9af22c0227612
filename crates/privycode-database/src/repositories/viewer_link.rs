//! Viewer link repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use privycode_core::error::{AppError, ErrorKind};
use privycode_core::result::AppResult;
use privycode_core::types::{PageRequest, PageResponse};
use privycode_entity::link::{CreateViewerLink, UpdateViewerLink, ViewerLink};

use crate::store::ViewerLinkStore;

/// PostgreSQL-backed store for viewer links.
#[derive(Debug, Clone)]
pub struct ViewerLinkRepository {
    pool: PgPool,
}

impl ViewerLinkRepository {
    /// Create a new viewer link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewerLinkStore for ViewerLinkRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ViewerLink>> {
        sqlx::query_as::<_, ViewerLink>(
            "SELECT * FROM viewer_links WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link by id", e))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ViewerLink>> {
        sqlx::query_as::<_, ViewerLink>(
            "SELECT * FROM viewer_links WHERE token = $1 AND deleted_at IS NULL",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link by token", e))
    }

    async fn find_by_owner(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ViewerLink>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM viewer_links WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count links", e))?;

        let links = sqlx::query_as::<_, ViewerLink>(
            "SELECT * FROM viewer_links WHERE user_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list links", e))?;

        Ok(PageResponse::new(
            links,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn create(&self, data: &CreateViewerLink) -> AppResult<ViewerLink> {
        sqlx::query_as::<_, ViewerLink>(
            "INSERT INTO viewer_links (user_id, repo_name, token, expires_at, max_views) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.repo_name)
        .bind(&data.token)
        .bind(data.expires_at)
        .bind(data.max_views)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("Viewer link token collision")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create link", e),
        })
    }

    async fn update(&self, id: Uuid, changes: &UpdateViewerLink) -> AppResult<Option<ViewerLink>> {
        sqlx::query_as::<_, ViewerLink>(
            "UPDATE viewer_links SET \
             expires_at = COALESCE($2, expires_at), \
             max_views = COALESCE($3, max_views), \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(changes.expires_at)
        .bind(changes.max_views)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update link", e))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE viewer_links SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete link", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_views_if_live(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ViewerLink>> {
        // Single-statement increment-if-below-limit: the WHERE clause is the
        // liveness predicate, so two racing grants cannot both pass a full cap.
        sqlx::query_as::<_, ViewerLink>(
            "UPDATE viewer_links SET view_count = view_count + 1, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL AND expires_at > $2 \
             AND (max_views = 0 OR view_count < max_views) \
             RETURNING *",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to consume view", e))
    }
}
