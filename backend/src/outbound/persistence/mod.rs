//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by an embedded SQLite file, driven asynchronously through
//! `diesel-async`'s sync connection wrapper and pooled with `bb8`.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Validation lives in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to the
//!   port error enums with driver details stripped.
//!
//! # Example
//!
//! ```ignore
//! use calculator_backend::outbound::persistence::{
//!     run_migrations, DbPool, DieselUserRepository, PoolConfig,
//! };
//!
//! run_migrations("calculator.db").await?;
//! let pool = DbPool::new(PoolConfig::new("calculator.db")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_calculation_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_calculation_repository::DieselCalculationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteAsyncConnection};
