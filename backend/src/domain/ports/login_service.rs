//! Driving port for the login use-case.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! resolve a username to a user without knowing the backing store. Handler
//! tests substitute the generated mock instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for logging in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Find the user named `username`, creating it on first login.
    ///
    /// The name is trimmed before lookup. Validation failures surface as
    /// [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest).
    async fn login(&self, username: &str) -> Result<User, Error>;
}
