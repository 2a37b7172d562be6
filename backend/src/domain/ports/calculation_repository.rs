//! Port for calculation history persistence.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, NewCalculation, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by calculation repository adapters.
    pub enum CalculationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "calculation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "calculation repository query failed: {message}",
    }
}

/// Port for writing, listing, and deleting a user's calculations.
///
/// Every operation is scoped to the owning user; a calculation id that
/// belongs to someone else behaves as if it did not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Persist a calculation, assigning its id and creation time.
    async fn insert(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, CalculationPersistenceError>;

    /// List a user's calculations, newest first. Records sharing a creation
    /// time are ordered by descending id.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Calculation>, CalculationPersistenceError>;

    /// Delete one calculation owned by `user_id`.
    ///
    /// Returns `false` when no matching record exists.
    async fn delete_for_user(
        &self,
        user_id: UserId,
        calculation_id: CalculationId,
    ) -> Result<bool, CalculationPersistenceError>;

    /// Delete every calculation owned by `user_id`, returning how many rows
    /// were removed.
    async fn delete_all_for_user(&self, user_id: UserId)
    -> Result<u64, CalculationPersistenceError>;
}
