//! Content host trait for the remote repository service.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Kind of a repository content entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
}

/// A single entry in a repository directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Entry name (last path segment).
    pub name: String,
    /// Whether the entry is a file or a directory.
    pub kind: EntryKind,
    /// Full path of the entry within the repository.
    pub path: String,
}

/// Summary of a repository, safe to show to anonymous viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Account that owns the repository.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

/// Trait for the remote content-hosting service.
///
/// Every call is made on behalf of a repository owner: the `credential`
/// argument is the owner's bearer token and is the sole capability the
/// remote service checks. The [`ContentHost`] trait is defined here in
/// `privycode-core` and implemented in `privycode-github`.
///
/// Implementations perform no retries; a failed call is terminal for the
/// current request.
#[async_trait]
pub trait ContentHost: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether a repository exists and is accessible with the
    /// given credential.
    async fn check_repo_exists(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
    ) -> AppResult<bool>;

    /// List the entries of a directory within the repository. An empty
    /// `path` lists the repository root.
    async fn list_directory(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> AppResult<Vec<ContentEntry>>;

    /// Read a file's raw bytes.
    async fn read_file(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> AppResult<Bytes>;

    /// Fetch the canonical owner and repository names.
    async fn get_repo_summary(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
    ) -> AppResult<RepoSummary>;
}
