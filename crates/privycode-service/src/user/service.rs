//! Owner upsert across OAuth logins.

use std::sync::Arc;

use tracing::info;

use privycode_core::result::AppResult;
use privycode_database::UserStore;
use privycode_entity::user::{CreateUser, User};

/// Maintains owner records.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Create or refresh an owner record after a successful OAuth login.
    ///
    /// A first login creates the record; every later login overwrites the
    /// stored credential with the fresh one. Existing viewer links keep
    /// working and proxy with the new credential from the next grant on.
    pub async fn upsert_from_github(
        &self,
        login: &str,
        email: &str,
        access_token: &str,
    ) -> AppResult<User> {
        match self.users.find_by_github_username(login).await? {
            Some(user) => {
                info!(user = %login, "Refreshing owner credential");
                self.users.update_token(user.id, access_token).await
            }
            None => {
                info!(user = %login, "Creating owner on first login");
                self.users
                    .create(&CreateUser {
                        github_username: login.to_string(),
                        email: email.to_string(),
                        github_token: access_token.to_string(),
                    })
                    .await
            }
        }
    }
}
