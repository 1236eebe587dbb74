//! PostgreSQL-backed `VocabularyRepository` implementation using Diesel ORM.
//!
//! Catalogue loading uses `INSERT .. ON CONFLICT DO NOTHING` so re-importing
//! a corpus never overwrites existing rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VocabularyRepository, VocabularyRepositoryError};
use crate::domain::{VocabId, VocabItem};

use super::diesel_basic_error_mapping::{
    count_to_u64, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewVocabularyRow, VocabularyRow};
use super::pool::{DbPool, PoolError};
use super::schema::vocabulary;

/// Rows per insert statement; four binds each keeps well under the Postgres
/// bind-parameter limit.
const INSERT_CHUNK: usize = 1_000;

/// Diesel-backed implementation of the vocabulary repository port.
#[derive(Clone)]
pub struct DieselVocabularyRepository {
    pool: DbPool,
}

impl DieselVocabularyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VocabularyRepositoryError {
    map_basic_pool_error(error, VocabularyRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VocabularyRepositoryError {
    map_basic_diesel_error(
        error,
        VocabularyRepositoryError::query,
        VocabularyRepositoryError::connection,
    )
}

/// Convert a database row into a validated catalogue item.
pub(super) fn row_to_item(row: VocabularyRow) -> Result<VocabItem, VocabularyRepositoryError> {
    let VocabularyRow {
        id,
        english,
        target_romanized,
        target_native_script,
    } = row;
    let id = VocabId::new(id)
        .map_err(|err| VocabularyRepositoryError::query(format!("stored vocabulary id: {err}")))?;
    Ok(VocabItem::new(
        id,
        english,
        target_romanized,
        target_native_script,
    ))
}

fn item_to_row(item: &VocabItem) -> NewVocabularyRow<'_> {
    NewVocabularyRow {
        id: item.id.as_ref(),
        english: &item.english,
        target_romanized: &item.target_romanized,
        target_native_script: &item.target_native_script,
    }
}

#[async_trait]
impl VocabularyRepository for DieselVocabularyRepository {
    async fn list_all(&self) -> Result<Vec<VocabItem>, VocabularyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VocabularyRow> = vocabulary::table
            .select(VocabularyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn count(&self) -> Result<u64, VocabularyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = vocabulary::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        count_to_u64(total, VocabularyRepositoryError::query)
    }

    async fn find_by_id(
        &self,
        id: &VocabId,
    ) -> Result<Option<VocabItem>, VocabularyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<VocabularyRow> = vocabulary::table
            .filter(vocabulary::id.eq(id.as_ref()))
            .select(VocabularyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_item).transpose()
    }

    async fn insert_missing(&self, items: &[VocabItem]) -> Result<u64, VocabularyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut inserted = 0_u64;

        for chunk in items.chunks(INSERT_CHUNK) {
            let rows: Vec<NewVocabularyRow<'_>> = chunk.iter().map(item_to_row).collect();
            let affected = diesel::insert_into(vocabulary::table)
                .values(&rows)
                .on_conflict_do_nothing()
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            inserted += affected as u64;
        }

        Ok(inserted)
    }
}
