//! Driving port for calculation history use-cases.

use async_trait::async_trait;

use crate::domain::{Calculation, Error, SaveCalculationRequest};

/// Domain use-case port for saving, listing, and deleting calculations.
///
/// Usernames are matched exactly as given; every operation fails with
/// [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound) and the
/// message `User not found` when the user does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationHistory: Send + Sync {
    /// Validate and persist a calculation for an existing user.
    async fn save(&self, request: SaveCalculationRequest) -> Result<Calculation, Error>;

    /// List the user's calculations, newest first.
    async fn list(&self, username: &str) -> Result<Vec<Calculation>, Error>;

    /// Delete one of the user's calculations.
    ///
    /// Identifiers that cannot name a stored record are reported as
    /// `Calculation not found`.
    async fn delete(&self, username: &str, calculation_id: i64) -> Result<(), Error>;

    /// Delete all of the user's calculations and return how many were
    /// removed. Fails with `No calculations to delete` when there are none.
    async fn clear_all(&self, username: &str) -> Result<u64, Error>;
}
