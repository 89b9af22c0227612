//! GitHub content client — the remote content proxy.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use privycode_core::config::github::GitHubConfig;
use privycode_core::error::{AppError, ErrorKind};
use privycode_core::result::AppResult;
use privycode_core::traits::{ContentEntry, ContentHost, RepoSummary};

use crate::types::{RawContentEntry, RawRepo};

/// Media type for JSON content responses.
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
/// Media type for raw file bodies.
const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";

/// Reads repository content from the GitHub REST API with an owner's
/// credential.
///
/// Performs no retries: GitHub rate limits make blind retries harmful, so a
/// failed call is surfaced to the caller as-is with the upstream status.
#[derive(Debug, Clone)]
pub struct GitHubContentClient {
    http: reqwest::Client,
    api_base: String,
}

impl GitHubContentClient {
    /// Create a content client from configuration.
    pub fn new(config: &GitHubConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("privycode-server/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_base: config.api_base_url.clone(),
        })
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/repos/{owner}/{repo}/contents", self.api_base)
        } else {
            format!("{}/repos/{owner}/{repo}/contents/{path}", self.api_base)
        }
    }

    async fn get(
        &self,
        credential: &str,
        url: String,
        accept: &str,
    ) -> AppResult<reqwest::Response> {
        debug!(url = %url, "GitHub API request");
        self.http
            .get(url)
            .header("Authorization", format!("token {credential}"))
            .header("Accept", accept)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("GitHub request failed: {e}"),
                    e,
                )
            })
    }

    /// Turn a non-success response into an upstream error carrying the
    /// status and body.
    async fn upstream_error(response: reqwest::Response) -> AppError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        AppError::upstream(status, body)
    }
}

#[async_trait]
impl ContentHost for GitHubContentClient {
    async fn check_repo_exists(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
    ) -> AppResult<bool> {
        let url = format!("{}/repos/{owner}/{repo}", self.api_base);
        let response = self.get(credential, url, ACCEPT_JSON).await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::upstream_error(response).await),
        }
    }

    async fn list_directory(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> AppResult<Vec<ContentEntry>> {
        let url = self.contents_url(owner, repo, path);
        let response = self.get(credential, url, ACCEPT_JSON).await?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let entries: Vec<RawContentEntry> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to decode GitHub directory listing: {e}"),
                e,
            )
        })?;
        Ok(entries.into_iter().map(ContentEntry::from).collect())
    }

    async fn read_file(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> AppResult<Bytes> {
        let url = self.contents_url(owner, repo, path);
        let response = self.get(credential, url, ACCEPT_RAW).await?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read GitHub file body: {e}"),
                e,
            )
        })
    }

    async fn get_repo_summary(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
    ) -> AppResult<RepoSummary> {
        let url = format!("{}/repos/{owner}/{repo}", self.api_base);
        let response = self.get(credential, url, ACCEPT_JSON).await?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let raw: RawRepo = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to decode GitHub repository: {e}"),
                e,
            )
        })?;
        Ok(RepoSummary {
            owner: raw.owner.login,
            repo: raw.name,
        })
    }
}
