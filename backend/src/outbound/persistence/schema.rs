//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Learner accounts, keyed by normalised username.
    users (username) {
        username -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vocabulary catalogue. Rows are inserted by corpus import only.
    vocabulary (id) {
        id -> Text,
        english -> Text,
        target_romanized -> Text,
        target_native_script -> Text,
    }
}

diesel::table! {
    /// One recall record per (learner, item) pair.
    ///
    /// `status` is constrained to `known` or `unknown`.
    progress (username, vocab_id) {
        username -> Text,
        vocab_id -> Text,
        status -> Text,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(progress -> users (username));
diesel::joinable!(progress -> vocabulary (vocab_id));

diesel::allow_tables_to_appear_in_same_query!(progress, users, vocabulary);
