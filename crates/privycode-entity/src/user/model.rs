//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A repository owner, created on first successful GitHub authentication.
///
/// The stored `github_token` is the owner's remote-service credential. It is
/// overwritten on every re-authentication; no rotation history is kept.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// GitHub login (unique).
    pub github_username: String,
    /// Email address (unique; noreply fallback when GitHub hides it).
    pub email: String,
    /// GitHub access token. Never serialized into responses.
    #[serde(skip_serializing)]
    pub github_token: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// GitHub login.
    pub github_username: String,
    /// Email address.
    pub email: String,
    /// GitHub access token.
    pub github_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            github_username: "octocat".to_string(),
            email: "octocat@users.noreply.github.com".to_string(),
            github_token: "gho_secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("gho_secret"));
        assert!(json.contains("octocat"));
    }
}
