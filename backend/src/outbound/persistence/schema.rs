//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Calculator users. `username` carries a unique index.
    user (id) {
        id -> Integer,
        username -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Saved calculations, owned by a user.
    calculation (id) {
        id -> Integer,
        user_id -> Integer,
        expression -> Text,
        result -> Text,
        calculation_type -> Text,
        custom_name -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(calculation -> user (user_id));
diesel::allow_tables_to_appear_in_same_query!(calculation, user);
