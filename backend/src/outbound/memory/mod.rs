//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by integration tests. It
//! enforces the same referential rules as the PostgreSQL schema: progress
//! may only reference existing users and catalogue items.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ProgressRepository, ProgressRepositoryError, UserPersistenceError, UserRepository,
    VocabularyRepository, VocabularyRepositoryError,
};
use crate::domain::{ProgressRecord, RecallStatus, User, Username, VocabId, VocabItem};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Username, User>,
    vocabulary: BTreeMap<VocabId, VocabItem>,
    progress: HashMap<(Username, VocabId), ProgressRecord>,
}

/// Thread-safe in-memory implementation of the user, vocabulary and
/// progress repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store whose catalogue already holds `items`.
    pub fn with_vocabulary(items: impl IntoIterator<Item = VocabItem>) -> Self {
        let mut tables = Tables::default();
        for item in items {
            tables.vocabulary.entry(item.id.clone()).or_insert(item);
        }
        Self {
            tables: Mutex::new(tables),
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, Tables>> {
        self.tables.lock().ok()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_if_absent(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut tables = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        let stored = tables
            .users
            .entry(user.username.clone())
            .or_insert_with(|| user.clone());
        Ok(stored.clone())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(tables.users.get(username).cloned())
    }
}

#[async_trait]
impl VocabularyRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<VocabItem>, VocabularyRepositoryError> {
        let tables = self
            .lock()
            .ok_or_else(|| VocabularyRepositoryError::query(POISONED))?;
        Ok(tables.vocabulary.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, VocabularyRepositoryError> {
        let tables = self
            .lock()
            .ok_or_else(|| VocabularyRepositoryError::query(POISONED))?;
        Ok(tables.vocabulary.len() as u64)
    }

    async fn find_by_id(
        &self,
        id: &VocabId,
    ) -> Result<Option<VocabItem>, VocabularyRepositoryError> {
        let tables = self
            .lock()
            .ok_or_else(|| VocabularyRepositoryError::query(POISONED))?;
        Ok(tables.vocabulary.get(id).cloned())
    }

    async fn insert_missing(&self, items: &[VocabItem]) -> Result<u64, VocabularyRepositoryError> {
        let mut tables = self
            .lock()
            .ok_or_else(|| VocabularyRepositoryError::query(POISONED))?;
        let mut inserted = 0;
        for item in items {
            if !tables.vocabulary.contains_key(&item.id) {
                tables.vocabulary.insert(item.id.clone(), item.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryStore {
    async fn item_ids_with_progress(
        &self,
        username: &Username,
    ) -> Result<HashSet<VocabId>, ProgressRepositoryError> {
        let tables = self
            .lock()
            .ok_or_else(|| ProgressRepositoryError::query(POISONED))?;
        Ok(tables
            .progress
            .values()
            .filter(|record| &record.username == username)
            .map(|record| record.vocab_id.clone())
            .collect())
    }

    async fn items_with_status(
        &self,
        username: &Username,
        status: RecallStatus,
    ) -> Result<Vec<VocabItem>, ProgressRepositoryError> {
        let tables = self
            .lock()
            .ok_or_else(|| ProgressRepositoryError::query(POISONED))?;
        Ok(tables
            .progress
            .values()
            .filter(|record| &record.username == username && record.status == status)
            .filter_map(|record| tables.vocabulary.get(&record.vocab_id).cloned())
            .collect())
    }

    async fn upsert(&self, record: &ProgressRecord) -> Result<(), ProgressRepositoryError> {
        let mut tables = self
            .lock()
            .ok_or_else(|| ProgressRepositoryError::query(POISONED))?;
        if !tables.users.contains_key(&record.username) {
            return Err(ProgressRepositoryError::unknown_user(
                record.username.as_ref(),
            ));
        }
        if !tables.vocabulary.contains_key(&record.vocab_id) {
            return Err(ProgressRepositoryError::unknown_vocabulary(
                record.vocab_id.as_ref(),
            ));
        }
        tables.progress.insert(
            (record.username.clone(), record.vocab_id.clone()),
            record.clone(),
        );
        Ok(())
    }

    async fn count_by_status(
        &self,
        username: &Username,
        status: RecallStatus,
    ) -> Result<u64, ProgressRepositoryError> {
        let tables = self
            .lock()
            .ok_or_else(|| ProgressRepositoryError::query(POISONED))?;
        let count = tables
            .progress
            .values()
            .filter(|record| &record.username == username && record.status == status)
            .count();
        Ok(count as u64)
    }
}
