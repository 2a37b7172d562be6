//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the SQLite setup they all need lives here.
#![allow(
    dead_code,
    reason = "each integration test crate uses a subset of the helpers"
)]

use std::sync::Arc;

use tempfile::TempDir;

use calculator_backend::domain::{
    AccountService, CalculationHistoryService, ExpressionCalculator,
};
use calculator_backend::inbound::http::state::HttpStatePorts;
use calculator_backend::outbound::persistence::{
    DbPool, DieselCalculationRepository, DieselUserRepository, PoolConfig, run_migrations,
};

/// Migrated SQLite database living in a temporary directory.
///
/// The directory, and with it the database file, is removed on drop.
pub struct SqliteFixture {
    pub pool: DbPool,
    _dir: TempDir,
}

impl SqliteFixture {
    /// Create a fresh database file and apply the embedded migrations.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let database_url = dir
            .path()
            .join("calculator.db")
            .to_string_lossy()
            .into_owned();
        run_migrations(&database_url)
            .await
            .expect("migrations apply");
        let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(2))
            .await
            .expect("pool builds");
        Self {
            pool,
            _dir: dir,
        }
    }

    pub fn users(&self) -> DieselUserRepository {
        DieselUserRepository::new(self.pool.clone())
    }

    pub fn calculations(&self) -> DieselCalculationRepository {
        DieselCalculationRepository::new(self.pool.clone())
    }

    /// Handler ports wired to the SQLite adapters.
    pub fn ports(&self) -> HttpStatePorts {
        let users = Arc::new(self.users());
        HttpStatePorts {
            calculator: Arc::new(ExpressionCalculator),
            login: Arc::new(AccountService::new(users.clone())),
            history: Arc::new(CalculationHistoryService::new(
                users,
                Arc::new(self.calculations()),
            )),
        }
    }
}
