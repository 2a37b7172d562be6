//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{calculation, user};

/// Row struct for reading from the user table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub created_at: NaiveDateTime,
}

/// Row struct for reading from the calculation table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = calculation)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CalculationRow {
    pub id: i32,
    pub user_id: i32,
    pub expression: String,
    pub result: String,
    pub calculation_type: String,
    pub custom_name: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for creating new calculation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = calculation)]
pub(crate) struct NewCalculationRow<'a> {
    pub user_id: i32,
    pub expression: &'a str,
    pub result: &'a str,
    pub calculation_type: &'a str,
    pub custom_name: Option<&'a str>,
    pub created_at: NaiveDateTime,
}
