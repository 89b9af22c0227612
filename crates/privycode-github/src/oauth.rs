//! GitHub OAuth handshake.
//!
//! Treated as an opaque "exchange code for token" collaboration: the broker
//! builds the authorize URL, swaps the callback code for an access token,
//! and fetches the authenticated user so the owner record can be upserted.

use reqwest::Url;
use tracing::debug;

use privycode_core::config::github::GitHubConfig;
use privycode_core::error::{AppError, ErrorKind};
use privycode_core::result::AppResult;

use crate::types::{AccessTokenResponse, GitHubUser};

/// GitHub OAuth client.
#[derive(Debug, Clone)]
pub struct GitHubOAuth {
    http: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubOAuth {
    /// Create an OAuth client from configuration.
    pub fn new(config: &GitHubConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("privycode-server/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Build the GitHub authorization URL for the given CSRF state.
    pub fn authorize_url(&self, state: &str) -> AppResult<String> {
        let url = Url::parse_with_params(
            &format!("{}/login/oauth/authorize", self.config.oauth_base_url),
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.callback_url.as_str()),
                ("scope", &self.config.scopes.join(" ")),
                ("state", state),
            ],
        )
        .map_err(|e| AppError::internal(format!("Failed to build authorize URL: {e}")))?;
        Ok(url.into())
    }

    /// Exchange a callback code for an access token.
    pub async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let response = self
            .http
            .post(format!(
                "{}/login/oauth/access_token",
                self.config.oauth_base_url
            ))
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.config.callback_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("OAuth code exchange failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(status.as_u16(), body));
        }

        let token: AccessTokenResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to decode token response: {e}"),
                e,
            )
        })?;

        debug!(scope = %token.scope, "Exchanged OAuth code for access token");
        Ok(token.access_token)
    }

    /// Fetch the authenticated user for an access token.
    pub async fn fetch_user(&self, access_token: &str) -> AppResult<GitHubUser> {
        let response = self
            .http
            .get(format!("{}/user", self.config.api_base_url))
            .header("Authorization", format!("token {access_token}"))
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Failed to fetch GitHub user: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(status.as_u16(), body));
        }

        response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to decode GitHub user: {e}"),
                e,
            )
        })
    }

    /// Frontend URL to redirect to after a successful login.
    pub fn frontend_redirect(&self) -> String {
        format!("{}/dashboard", self.config.frontend_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GitHubConfig {
        GitHubConfig {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            callback_url: "http://localhost:8080/api/auth/github/callback".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            scopes: vec!["read:user".to_string(), "repo".to_string()],
            api_base_url: "https://api.github.com".to_string(),
            oauth_base_url: "https://github.com".to_string(),
            request_timeout_seconds: 10,
        }
    }

    #[test]
    fn test_authorize_url() {
        let oauth = GitHubOAuth::new(&config()).expect("client");
        let url = oauth.authorize_url("abc123").expect("url");
        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("client_id=cid"));
        assert!(url.contains("state=abc123"));
        assert!(url.contains("scope=read%3Auser+repo"));
    }

    #[test]
    fn test_frontend_redirect() {
        let oauth = GitHubOAuth::new(&config()).expect("client");
        assert_eq!(oauth.frontend_redirect(), "http://localhost:5173/dashboard");
    }
}
