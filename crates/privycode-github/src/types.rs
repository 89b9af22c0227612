//! Wire types for the GitHub REST and OAuth APIs.

use serde::Deserialize;

use privycode_core::traits::{ContentEntry, EntryKind};

/// One entry of a `GET /repos/{owner}/{repo}/contents/{path}` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawContentEntry {
    /// Entry name.
    pub name: String,
    /// GitHub entry type: `"file"`, `"dir"`, `"symlink"`, or `"submodule"`.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Path within the repository.
    pub path: String,
}

impl From<RawContentEntry> for ContentEntry {
    fn from(raw: RawContentEntry) -> Self {
        let kind = match raw.entry_type.as_str() {
            "dir" => EntryKind::Dir,
            _ => EntryKind::File,
        };
        Self {
            name: raw.name,
            kind,
            path: raw.path,
        }
    }
}

/// Repository metadata subset from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    /// Repository name.
    pub name: String,
    /// Owning account.
    pub owner: RawRepoOwner,
}

/// Owner block of a repository response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepoOwner {
    /// Account login.
    pub login: String,
}

/// The authenticated user from `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    /// Account login.
    pub login: String,
    /// Public email, when the account exposes one.
    pub email: Option<String>,
}

impl GitHubUser {
    /// The account email, falling back to the noreply address GitHub
    /// assigns accounts with a private email.
    pub fn email_or_noreply(&self) -> String {
        match &self.email {
            Some(email) if !email.is_empty() => email.clone(),
            _ => format!("{}@users.noreply.github.com", self.login),
        }
    }
}

/// Response of the OAuth code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    /// The granted access token.
    pub access_token: String,
    /// Token type, normally `"bearer"`.
    #[serde(default)]
    pub token_type: String,
    /// Granted scopes, comma-separated.
    #[serde(default)]
    pub scope: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_mapping() {
        let raw = RawContentEntry {
            name: "src".to_string(),
            entry_type: "dir".to_string(),
            path: "src".to_string(),
        };
        let entry = ContentEntry::from(raw);
        assert_eq!(entry.kind, EntryKind::Dir);

        let raw = RawContentEntry {
            name: "main.rs".to_string(),
            entry_type: "file".to_string(),
            path: "src/main.rs".to_string(),
        };
        assert_eq!(ContentEntry::from(raw).kind, EntryKind::File);
    }

    #[test]
    fn test_noreply_fallback() {
        let user = GitHubUser {
            login: "octocat".to_string(),
            email: None,
        };
        assert_eq!(
            user.email_or_noreply(),
            "octocat@users.noreply.github.com"
        );

        let user = GitHubUser {
            login: "octocat".to_string(),
            email: Some("cat@example.com".to_string()),
        };
        assert_eq!(user.email_or_noreply(), "cat@example.com");
    }

    #[test]
    fn test_content_listing_deserializes() {
        let body = r#"[
            {"name": "README.md", "type": "file", "path": "README.md", "url": "ignored"},
            {"name": "src", "type": "dir", "path": "src"}
        ]"#;
        let entries: Vec<RawContentEntry> = serde_json::from_str(body).expect("deserialize");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].entry_type, "dir");
    }
}
