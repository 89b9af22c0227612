//! Authenticated request context.

use uuid::Uuid;

use privycode_entity::user::User;

/// Context of an authenticated owner request, produced by the session
/// authenticator at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The owner's user ID.
    pub user_id: Uuid,
    /// The owner's GitHub login.
    pub github_username: String,
    /// The owner's email address.
    pub email: String,
    /// The owner's remote-service credential. Kept private so it cannot
    /// leak into response bodies; services reach it via [`Self::credential`].
    github_token: String,
}

impl RequestContext {
    /// Build a context from a resolved owner record.
    pub fn new(user: User) -> Self {
        Self {
            user_id: user.id,
            github_username: user.github_username,
            email: user.email,
            github_token: user.github_token,
        }
    }

    /// The owner's remote-service credential.
    pub fn credential(&self) -> &str {
        &self.github_token
    }
}
