//! Login use-case backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{Error, User, Username};

/// Find-or-create login service.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    Error::internal(format!("Login error: {error}"))
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn login(&self, username: &str) -> Result<User, Error> {
        let username =
            Username::new(username).map_err(|err| Error::invalid_request(err.to_string()))?;

        if let Some(user) = self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(map_user_error)?
        {
            debug!(user_id = %user.id(), "existing user logged in");
            return Ok(user);
        }

        let user = self.users.insert(&username).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), username = %user.username(), "created user on first login");
        Ok(user)
    }
}
