//! In-Memory Repository
//!
//! Reference [`Repository`] backed by an ordered map behind an async lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    DeleteResult, Filter, NewRecord, RecordUpdate, Repository, RepositoryError, RepositoryResult,
    UpdateOptions, UpdateResult,
};
use crate::cache::{Record, RecordId};

#[derive(Debug)]
struct MemoryState {
    /// Records keyed by id; iteration order is insertion order
    records: BTreeMap<RecordId, Record>,
    /// Next id to hand out
    next_id: RecordId,
}

impl MemoryState {
    fn first_match(&self, filter: &Filter) -> Option<RecordId> {
        match filter {
            Filter::Id(id) => self.records.contains_key(id).then_some(*id),
            _ => self
                .records
                .values()
                .find(|record| filter.matches(record))
                .map(|record| record.id),
        }
    }

    fn key_taken(&self, key: &str, except: Option<RecordId>) -> bool {
        self.records
            .values()
            .any(|record| record.key == key && Some(record.id) != except)
    }

    fn insert(&mut self, new: NewRecord) -> RepositoryResult<Record> {
        if self.key_taken(&new.key, None) {
            return Err(RepositoryError::DuplicateKey(new.key));
        }

        let id = self.next_id;
        self.next_id += 1;

        let record = Record {
            id,
            key: new.key,
            value: new.value,
            updated_at: new.updated_at,
        };
        self.records.insert(id, record.clone());
        Ok(record)
    }
}

// == In-Memory Repository ==
/// Thread-safe in-memory record storage.
///
/// Ids start at 1 and are never reused. Key uniqueness is enforced on
/// insert and on key-changing updates.
#[derive(Debug)]
pub struct InMemoryRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_one(&self, filter: &Filter) -> RepositoryResult<Option<Record>> {
        let state = self.state.read().await;
        Ok(state
            .first_match(filter)
            .and_then(|id| state.records.get(&id).cloned()))
    }

    async fn find(&self, filter: &Filter) -> RepositoryResult<Vec<Record>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn create(&self, record: NewRecord) -> RepositoryResult<Record> {
        let mut state = self.state.write().await;
        let record = state.insert(record)?;
        debug!(id = record.id, key = %record.key, "inserted record");
        Ok(record)
    }

    async fn update_one(
        &self,
        filter: &Filter,
        update: RecordUpdate,
        options: UpdateOptions,
    ) -> RepositoryResult<UpdateResult> {
        let mut state = self.state.write().await;

        let Some(id) = state.first_match(filter) else {
            if !options.upsert {
                return Ok(UpdateResult::default());
            }

            let key = match (update.key, filter) {
                (Some(key), _) => key,
                (None, Filter::Key(key)) => key.clone(),
                (None, _) => {
                    return Err(RepositoryError::Invalid(
                        "upsert without a key to insert".to_string(),
                    ))
                }
            };
            let record = state.insert(NewRecord {
                key,
                value: update.value.unwrap_or_default(),
                updated_at: update.updated_at.unwrap_or_else(Utc::now),
            })?;
            debug!(id = record.id, key = %record.key, "upserted record");

            return Ok(UpdateResult {
                matched: 0,
                modified: 0,
                upserted_id: Some(record.id),
            });
        };

        if let Some(key) = &update.key {
            if state.key_taken(key, Some(id)) {
                return Err(RepositoryError::DuplicateKey(key.clone()));
            }
        }

        let Some(record) = state.records.get_mut(&id) else {
            return Ok(UpdateResult::default());
        };

        let mut changed = false;
        if let Some(key) = update.key {
            changed |= record.key != key;
            record.key = key;
        }
        if let Some(value) = update.value {
            changed |= record.value != value;
            record.value = value;
        }
        if let Some(updated_at) = update.updated_at {
            changed |= record.updated_at != updated_at;
            record.updated_at = updated_at;
        }

        Ok(UpdateResult {
            matched: 1,
            modified: u64::from(changed),
            upserted_id: None,
        })
    }

    async fn delete_one(&self, filter: &Filter) -> RepositoryResult<DeleteResult> {
        let mut state = self.state.write().await;
        let deleted = state
            .first_match(filter)
            .and_then(|id| state.records.remove(&id))
            .map_or(0, |_| 1);
        Ok(DeleteResult { deleted })
    }

    async fn delete_many(&self, filter: &Filter) -> RepositoryResult<DeleteResult> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|_, record| !filter.matches(record));
        Ok(DeleteResult {
            deleted: (before - state.records.len()) as u64,
        })
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.state.read().await.records.len())
    }
}
