//! SQLite-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError, SqliteAsyncConnection};
use super::schema::user;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        username,
        created_at,
    } = row;
    let username = Username::new(username)
        .map_err(|err| UserPersistenceError::query(format!("stored username is invalid: {err}")))?;
    Ok(User::new(UserId::new(id), username, created_at))
}

async fn load_by_username(
    conn: &mut SqliteAsyncConnection,
    username: &str,
) -> Result<Option<UserRow>, DieselError> {
    user::table
        .filter(user::username.eq(username))
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_by_username(&mut conn, username)
            .await
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn insert(&self, username: &Username) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            username: username.as_ref(),
            created_at: Utc::now().naive_utc().trunc_subsecs(6),
        };

        let inserted = diesel::insert_into(user::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await;

        match inserted {
            Ok(row) => row_to_user(row),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                // A concurrent login created the user first.
                debug!(username = %username, "user already exists; re-reading");
                load_by_username(&mut conn, username.as_ref())
                    .await
                    .map_err(map_diesel_error)?
                    .ok_or_else(|| UserPersistenceError::query("record not found"))
                    .and_then(row_to_user)
            }
            Err(err) => Err(map_diesel_error(err)),
        }
    }
}
