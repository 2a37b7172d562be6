//! In-memory implementations of the persistence ports.
//!
//! [`InMemoryStore`] keeps users and calculations in process memory behind a
//! single mutex. It backs `storage = "memory"` deployments and tests that
//! need real repository behaviour without a database file. Ordering and
//! scoping mirror the SQLite adapters.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDateTime, SubsecRound, Utc};

use crate::domain::ports::{
    CalculationPersistenceError, CalculationRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Calculation, CalculationId, NewCalculation, User, UserId, Username};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    calculations: Vec<Calculation>,
    last_user_id: i32,
    last_calculation_id: i32,
}

/// Process-local store implementing both repository ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

fn next_id(last: &mut i32) -> Option<i32> {
    *last = last.checked_add(1)?;
    Some(*last)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(state
            .users
            .iter()
            .find(|user| user.username().as_ref() == username)
            .cloned())
    }

    async fn insert(&self, username: &Username) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::connection)?;
        if let Some(existing) = state.users.iter().find(|user| user.username() == username) {
            return Ok(existing.clone());
        }
        let id = next_id(&mut state.last_user_id)
            .ok_or_else(|| UserPersistenceError::query("user id space exhausted"))?;
        let user = User::new(UserId::new(id), username.clone(), now());
        state.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl CalculationRepository for InMemoryStore {
    async fn insert(
        &self,
        record: &NewCalculation,
    ) -> Result<Calculation, CalculationPersistenceError> {
        let mut state = self.lock().map_err(CalculationPersistenceError::connection)?;
        if !state.users.iter().any(|user| user.id() == record.user_id()) {
            return Err(CalculationPersistenceError::query(
                "referenced record does not exist",
            ));
        }
        let id = next_id(&mut state.last_calculation_id)
            .ok_or_else(|| CalculationPersistenceError::query("calculation id space exhausted"))?;
        let saved = record
            .clone()
            .into_calculation(CalculationId::new(id), now());
        state.calculations.push(saved.clone());
        Ok(saved)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        let state = self.lock().map_err(CalculationPersistenceError::connection)?;
        let mut owned: Vec<Calculation> = state
            .calculations
            .iter()
            .filter(|calculation| calculation.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(owned)
    }

    async fn delete_for_user(
        &self,
        user_id: UserId,
        calculation_id: CalculationId,
    ) -> Result<bool, CalculationPersistenceError> {
        let mut state = self.lock().map_err(CalculationPersistenceError::connection)?;
        let before = state.calculations.len();
        state
            .calculations
            .retain(|calculation| !(calculation.id == calculation_id && calculation.user_id == user_id));
        Ok(state.calculations.len() < before)
    }

    async fn delete_all_for_user(
        &self,
        user_id: UserId,
    ) -> Result<u64, CalculationPersistenceError> {
        let mut state = self.lock().map_err(CalculationPersistenceError::connection)?;
        let before = state.calculations.len();
        state
            .calculations
            .retain(|calculation| calculation.user_id != user_id);
        let removed = before - state.calculations.len();
        u64::try_from(removed)
            .map_err(|_| CalculationPersistenceError::query("deleted row count out of range"))
    }
}
