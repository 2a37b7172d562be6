//! SQLite-backed `CalculationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CalculationPersistenceError, CalculationRepository};
use crate::domain::{Calculation, CalculationId, CalculationKind, NewCalculation, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CalculationRow, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculation;

/// Diesel-backed implementation of the calculation repository port.
#[derive(Clone)]
pub struct DieselCalculationRepository {
    pool: DbPool,
}

impl DieselCalculationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationPersistenceError {
    map_basic_pool_error(error, |message| {
        CalculationPersistenceError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> CalculationPersistenceError {
    map_basic_diesel_error(
        error,
        CalculationPersistenceError::query,
        CalculationPersistenceError::connection,
    )
}

fn row_to_calculation(row: CalculationRow) -> Calculation {
    Calculation {
        id: CalculationId::new(row.id),
        user_id: UserId::new(row.user_id),
        expression: row.expression,
        result: row.result,
        kind: CalculationKind::from_stored(row.calculation_type),
        custom_name: row.custom_name,
        created_at: row.created_at,
    }
}

#[async_trait]
impl CalculationRepository for DieselCalculationRepository {
    async fn insert(
        &self,
        record: &NewCalculation,
    ) -> Result<Calculation, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCalculationRow {
            user_id: record.user_id().get(),
            expression: record.expression(),
            result: record.result(),
            calculation_type: record.kind().as_ref(),
            custom_name: record.custom_name(),
            created_at: Utc::now().naive_utc().trunc_subsecs(6),
        };

        diesel::insert_into(calculation::table)
            .values(&new_row)
            .returning(CalculationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_calculation)
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CalculationRow> = calculation::table
            .filter(calculation::user_id.eq(user_id.get()))
            .order((calculation::created_at.desc(), calculation::id.desc()))
            .select(CalculationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_calculation).collect())
    }

    async fn delete_for_user(
        &self,
        user_id: UserId,
        calculation_id: CalculationId,
    ) -> Result<bool, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            calculation::table
                .filter(calculation::id.eq(calculation_id.get()))
                .filter(calculation::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn delete_all_for_user(
        &self,
        user_id: UserId,
    ) -> Result<u64, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            calculation::table.filter(calculation::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        u64::try_from(deleted)
            .map_err(|_| CalculationPersistenceError::query("deleted row count out of range"))
    }
}
