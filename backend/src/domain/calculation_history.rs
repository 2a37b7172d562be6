//! Calculation history use-cases.
//!
//! Each operation resolves the owning user by exact username first, then
//! performs a single repository call. Repository failures become internal
//! errors prefixed with the operation that failed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CalculationHistory, CalculationPersistenceError, CalculationRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Calculation, CalculationId, Error, NewCalculation, SaveCalculationRequest, User,
};

/// Operation prefixes used in internal error messages.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Save,
    List,
    Delete,
    Clear,
}

impl Operation {
    fn prefix(self) -> &'static str {
        match self {
            Self::Save => "Save error",
            Self::List => "Error",
            Self::Delete => "Delete error",
            Self::Clear => "Clear error",
        }
    }

    fn user_error(self, error: UserPersistenceError) -> Error {
        Error::internal(format!("{}: {error}", self.prefix()))
    }

    fn calculation_error(self, error: CalculationPersistenceError) -> Error {
        Error::internal(format!("{}: {error}", self.prefix()))
    }
}

/// Calculation history service implementing the driving port.
#[derive(Clone)]
pub struct CalculationHistoryService<U, C> {
    users: Arc<U>,
    calculations: Arc<C>,
}

impl<U, C> CalculationHistoryService<U, C> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, calculations: Arc<C>) -> Self {
        Self {
            users,
            calculations,
        }
    }
}

impl<U, C> CalculationHistoryService<U, C>
where
    U: UserRepository,
    C: CalculationRepository,
{
    async fn owner(&self, username: &str, operation: Operation) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(|err| operation.user_error(err))?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[async_trait]
impl<U, C> CalculationHistory for CalculationHistoryService<U, C>
where
    U: UserRepository,
    C: CalculationRepository,
{
    async fn save(&self, request: SaveCalculationRequest) -> Result<Calculation, Error> {
        let SaveCalculationRequest {
            username,
            expression,
            result,
            calculation_type,
            custom_name,
        } = request;
        if username.is_empty() || expression.is_empty() || result.is_empty() {
            return Err(Error::invalid_request("Missing required fields"));
        }

        let owner = self.owner(&username, Operation::Save).await?;
        let record =
            NewCalculation::try_new(owner.id(), expression, result, calculation_type, custom_name)
                .map_err(|err| Error::invalid_request(err.to_string()))?;

        let saved = self
            .calculations
            .insert(&record)
            .await
            .map_err(|err| Operation::Save.calculation_error(err))?;
        info!(
            user_id = %saved.user_id,
            calculation_id = %saved.id,
            "saved calculation"
        );
        Ok(saved)
    }

    async fn list(&self, username: &str) -> Result<Vec<Calculation>, Error> {
        let owner = self.owner(username, Operation::List).await?;
        self.calculations
            .list_for_user(owner.id())
            .await
            .map_err(|err| Operation::List.calculation_error(err))
    }

    async fn delete(&self, username: &str, calculation_id: i64) -> Result<(), Error> {
        let owner = self.owner(username, Operation::Delete).await?;
        let Ok(raw_id) = i32::try_from(calculation_id) else {
            return Err(Error::not_found("Calculation not found"));
        };
        let calculation_id = CalculationId::new(raw_id);

        let deleted = self
            .calculations
            .delete_for_user(owner.id(), calculation_id)
            .await
            .map_err(|err| Operation::Delete.calculation_error(err))?;
        if !deleted {
            return Err(Error::not_found("Calculation not found"));
        }
        debug!(user_id = %owner.id(), %calculation_id, "deleted calculation");
        Ok(())
    }

    async fn clear_all(&self, username: &str) -> Result<u64, Error> {
        let owner = self.owner(username, Operation::Clear).await?;
        let deleted = self
            .calculations
            .delete_all_for_user(owner.id())
            .await
            .map_err(|err| Operation::Clear.calculation_error(err))?;
        if deleted == 0 {
            return Err(Error::invalid_request("No calculations to delete"));
        }
        info!(user_id = %owner.id(), deleted, "cleared calculation history");
        Ok(deleted)
    }
}

#[cfg(test)]
#[path = "calculation_history_tests.rs"]
mod tests;
