//! In-memory store using a Tokio mutex, for tests and single-node
//! development runs without PostgreSQL.
//!
//! Semantics mirror the PostgreSQL repositories: token uniqueness is
//! enforced at write time, user deletion cascades to links, soft-deleted
//! links are invisible to every lookup, and view consumption is an atomic
//! check-and-increment under the lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use privycode_core::error::AppError;
use privycode_core::result::AppResult;
use privycode_core::types::{PageRequest, PageResponse};
use privycode_entity::link::{CreateViewerLink, UpdateViewerLink, ViewerLink};
use privycode_entity::user::{CreateUser, User};

use crate::store::{UserStore, ViewerLinkStore};

/// Protected inner state.
#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<Uuid, User>,
    links: HashMap<Uuid, ViewerLink>,
}

/// In-memory implementation of both store traits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-deleted links currently held. Test support.
    pub async fn live_link_count(&self) -> usize {
        let state = self.state.lock().await;
        state
            .links
            .values()
            .filter(|l| l.deleted_at.is_none())
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_github_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.github_username == username)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.github_token == token)
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state
            .users
            .values()
            .any(|u| u.github_username == data.github_username || u.email == data.email)
        {
            return Err(AppError::conflict("User already exists"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            github_username: data.github_username.clone(),
            email: data.email.clone(),
            github_token: data.github_token.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_token(&self, id: Uuid, github_token: &str) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.github_token = github_token.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let removed = state.users.remove(&id).is_some();
        if removed {
            // FK cascade.
            state.links.retain(|_, link| link.user_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ViewerLinkStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ViewerLink>> {
        let state = self.state.lock().await;
        Ok(state
            .links
            .get(&id)
            .filter(|l| l.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ViewerLink>> {
        let state = self.state.lock().await;
        Ok(state
            .links
            .values()
            .find(|l| l.token == token && l.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_owner(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ViewerLink>> {
        let state = self.state.lock().await;
        let mut links: Vec<ViewerLink> = state
            .links
            .values()
            .filter(|l| l.user_id == user_id && l.deleted_at.is_none())
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = links.len() as u64;
        let items = links
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn create(&self, data: &CreateViewerLink) -> AppResult<ViewerLink> {
        let mut state = self.state.lock().await;
        if state.links.values().any(|l| l.token == data.token) {
            return Err(AppError::conflict("Viewer link token collision"));
        }
        let now = Utc::now();
        let link = ViewerLink {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            repo_name: data.repo_name.clone(),
            token: data.token.clone(),
            expires_at: data.expires_at,
            max_views: data.max_views,
            view_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.links.insert(link.id, link.clone());
        Ok(link)
    }

    async fn update(&self, id: Uuid, changes: &UpdateViewerLink) -> AppResult<Option<ViewerLink>> {
        let mut state = self.state.lock().await;
        let Some(link) = state.links.get_mut(&id).filter(|l| l.deleted_at.is_none()) else {
            return Ok(None);
        };
        if let Some(expires_at) = changes.expires_at {
            link.expires_at = expires_at;
        }
        if let Some(max_views) = changes.max_views {
            link.max_views = max_views;
        }
        link.updated_at = Utc::now();
        Ok(Some(link.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let Some(link) = state.links.get_mut(&id).filter(|l| l.deleted_at.is_none()) else {
            return Ok(false);
        };
        link.deleted_at = Some(Utc::now());
        Ok(true)
    }

    async fn increment_views_if_live(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ViewerLink>> {
        let mut state = self.state.lock().await;
        let Some(link) = state.links.get_mut(&id) else {
            return Ok(None);
        };
        if !link.is_live(now) {
            return Ok(None);
        }
        link.view_count += 1;
        link.updated_at = Utc::now();
        Ok(Some(link.clone()))
    }
}
