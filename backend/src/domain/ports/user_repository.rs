//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for storing and looking up calculator users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by exact username.
    ///
    /// The lookup does not trim or otherwise normalise `username`.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Create a user, stamping the creation time.
    ///
    /// When a user with the same name already exists the stored user is
    /// returned instead of creating a duplicate.
    async fn insert(&self, username: &Username) -> Result<User, UserPersistenceError>;
}
