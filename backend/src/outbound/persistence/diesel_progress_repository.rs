//! PostgreSQL-backed `ProgressRepository` implementation using Diesel ORM.
//!
//! Upserts rely on the `(username, vocab_id)` primary key. Foreign-key
//! violations are reported as unknown-user or unknown-vocabulary errors.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProgressRepository, ProgressRepositoryError};
use crate::domain::{ProgressRecord, RecallStatus, Username, VocabId, VocabItem};

use super::diesel_basic_error_mapping::{
    count_to_u64, foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_vocabulary_repository::row_to_item;
use super::models::{NewProgressRow, VocabularyRow};
use super::pool::{DbPool, PoolError};
use super::schema::{progress, vocabulary};

/// Diesel-backed implementation of the progress repository port.
#[derive(Clone)]
pub struct DieselProgressRepository {
    pool: DbPool,
}

impl DieselProgressRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProgressRepositoryError {
    map_basic_pool_error(error, ProgressRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProgressRepositoryError {
    map_basic_diesel_error(
        error,
        ProgressRepositoryError::query,
        ProgressRepositoryError::connection,
    )
}

/// Map an upsert failure, naming the dangling reference when possible.
fn map_upsert_error(
    error: diesel::result::Error,
    record: &ProgressRecord,
) -> ProgressRepositoryError {
    match foreign_key_violation(&error) {
        Some(constraint) if constraint.contains("vocab_id") => {
            ProgressRepositoryError::unknown_vocabulary(record.vocab_id.as_ref())
        }
        Some(constraint) if constraint.contains("username") => {
            ProgressRepositoryError::unknown_user(record.username.as_ref())
        }
        Some(constraint) => {
            warn!(%constraint, "unrecognised foreign key violation on progress");
            ProgressRepositoryError::query("foreign key violation")
        }
        None => map_diesel_error(error),
    }
}

fn map_vocabulary_row(row: VocabularyRow) -> Result<VocabItem, ProgressRepositoryError> {
    row_to_item(row).map_err(|err| ProgressRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ProgressRepository for DieselProgressRepository {
    async fn item_ids_with_progress(
        &self,
        username: &Username,
    ) -> Result<HashSet<VocabId>, ProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<String> = progress::table
            .filter(progress::username.eq(username.as_ref()))
            .select(progress::vocab_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        ids.into_iter()
            .map(|id| {
                VocabId::new(id).map_err(|err| {
                    ProgressRepositoryError::query(format!("stored vocabulary id: {err}"))
                })
            })
            .collect()
    }

    async fn items_with_status(
        &self,
        username: &Username,
        status: RecallStatus,
    ) -> Result<Vec<VocabItem>, ProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VocabularyRow> = vocabulary::table
            .inner_join(progress::table)
            .filter(progress::username.eq(username.as_ref()))
            .filter(progress::status.eq(status.as_str()))
            .select(VocabularyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(map_vocabulary_row).collect()
    }

    async fn upsert(&self, record: &ProgressRecord) -> Result<(), ProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProgressRow {
            username: record.username.as_ref(),
            vocab_id: record.vocab_id.as_ref(),
            status: record.status.as_str(),
            updated_at: record.updated_at,
        };

        diesel::insert_into(progress::table)
            .values(&row)
            .on_conflict((progress::username, progress::vocab_id))
            .do_update()
            .set((
                progress::status.eq(excluded(progress::status)),
                progress::updated_at.eq(excluded(progress::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_upsert_error(err, record))
    }

    async fn count_by_status(
        &self,
        username: &Username,
        status: RecallStatus,
    ) -> Result<u64, ProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = progress::table
            .filter(progress::username.eq(username.as_ref()))
            .filter(progress::status.eq(status.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        count_to_u64(total, ProgressRepositoryError::query)
    }
}
