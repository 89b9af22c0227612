//! GitHub OAuth and content API configuration.

use serde::{Deserialize, Serialize};

/// GitHub integration configuration.
///
/// Covers both halves of the GitHub collaboration: the OAuth handshake that
/// authenticates repository owners, and the content API the proxy reads
/// repository data from on their behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// OAuth application client ID.
    pub client_id: String,
    /// OAuth application client secret.
    pub client_secret: String,
    /// Callback URL registered with the OAuth application.
    pub callback_url: String,
    /// Frontend base URL to redirect to after a successful login.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// OAuth scopes requested at authorization time.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Base URL of the GitHub REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL of the GitHub OAuth endpoints.
    #[serde(default = "default_oauth_base_url")]
    pub oauth_base_url: String,
    /// Bounded timeout applied to every outbound GitHub request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_scopes() -> Vec<String> {
    vec!["read:user".to_string(), "repo".to_string()]
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_oauth_base_url() -> String {
    "https://github.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
