//! Shared test helpers for service tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use privycode_core::config::links::LinkConfig;
use privycode_core::error::AppError;
use privycode_core::result::AppResult;
use privycode_core::traits::{ContentEntry, ContentHost, EntryKind, RepoSummary};
use privycode_database::memory::MemoryStore;
use privycode_database::UserStore;
use privycode_entity::user::{CreateUser, User};
use privycode_service::link::{AccessGate, LinkService};
use privycode_service::RequestContext;

/// Content host stub with a fixed reachability answer and canned content.
#[derive(Debug)]
pub struct StubContentHost {
    reachable: bool,
}

impl StubContentHost {
    pub fn reachable() -> Self {
        Self { reachable: true }
    }

    pub fn unreachable() -> Self {
        Self { reachable: false }
    }
}

#[async_trait]
impl ContentHost for StubContentHost {
    async fn check_repo_exists(&self, _: &str, _: &str, _: &str) -> AppResult<bool> {
        Ok(self.reachable)
    }

    async fn list_directory(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &str,
    ) -> AppResult<Vec<ContentEntry>> {
        if !self.reachable {
            return Err(AppError::upstream(404, "Not Found"));
        }
        Ok(vec![
            ContentEntry {
                name: "README.md".to_string(),
                kind: EntryKind::File,
                path: "README.md".to_string(),
            },
            ContentEntry {
                name: "src".to_string(),
                kind: EntryKind::Dir,
                path: "src".to_string(),
            },
        ])
    }

    async fn read_file(&self, _: &str, _: &str, _: &str, _: &str) -> AppResult<Bytes> {
        if !self.reachable {
            return Err(AppError::upstream(404, "Not Found"));
        }
        Ok(Bytes::from_static(b"fn main() {}\n"))
    }

    async fn get_repo_summary(&self, _: &str, owner: &str, repo: &str) -> AppResult<RepoSummary> {
        if !self.reachable {
            return Err(AppError::upstream(404, "Not Found"));
        }
        Ok(RepoSummary {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

/// Fully wired services over a shared in-memory store.
pub struct TestHarness {
    pub store: MemoryStore,
    pub links: LinkService,
    pub gate: AccessGate,
    pub ctx: RequestContext,
}

/// Build a harness whose content host reports every repository reachable.
pub async fn harness() -> TestHarness {
    harness_with(StubContentHost::reachable()).await
}

/// Build a harness with a specific content host stub.
pub async fn harness_with(content: StubContentHost) -> TestHarness {
    let store = MemoryStore::new();
    let owner = create_owner(&store, "octocat").await;

    let links = LinkService::new(
        Arc::new(store.clone()),
        Arc::new(content),
        LinkConfig::default(),
        "http://localhost:8080",
    );
    let gate = AccessGate::new(Arc::new(store.clone()), Arc::new(store.clone()));

    TestHarness {
        store,
        links,
        gate,
        ctx: RequestContext::new(owner),
    }
}

/// Insert an owner directly into the store.
pub async fn create_owner(store: &MemoryStore, login: &str) -> User {
    store
        .create(&CreateUser {
            github_username: login.to_string(),
            email: format!("{login}@users.noreply.github.com"),
            github_token: format!("gho_{login}"),
        })
        .await
        .expect("create owner")
}
