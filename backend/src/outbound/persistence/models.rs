//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{progress, users, vocabulary};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Vocabulary models
// ---------------------------------------------------------------------------

/// Row struct for reading from the vocabulary table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vocabulary)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VocabularyRow {
    pub id: String,
    pub english: String,
    pub target_romanized: String,
    pub target_native_script: String,
}

/// Insertable struct for catalogue loading.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vocabulary)]
pub(crate) struct NewVocabularyRow<'a> {
    pub id: &'a str,
    pub english: &'a str,
    pub target_romanized: &'a str,
    pub target_native_script: &'a str,
}

// ---------------------------------------------------------------------------
// Progress models
// ---------------------------------------------------------------------------

/// Insertable struct for progress upserts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = progress)]
pub(crate) struct NewProgressRow<'a> {
    pub username: &'a str,
    pub vocab_id: &'a str,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}
