//! Cache Engine Module
//!
//! Bounded key/value cache on top of a [`Repository`]. Fetches renew warm
//! records, regenerate expired ones and create unknown keys; a full store
//! reuses the slot of its least recently touched record instead of failing.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::cache::{pick_victim, CacheStats, Record};
use crate::error::{CacheError, Result};
use crate::generator::ValueGenerator;
use crate::repository::{Filter, NewRecord, RecordUpdate, Repository, UpdateOptions};

// == Cache Engine ==
/// Fixed-capacity key/value cache with TTL renewal and slot-reuse eviction.
///
/// Every mutating operation holds the write side of `state` for its whole
/// read-then-write sequence, so exists-checks, capacity checks and victim
/// scans cannot interleave. Reads take the read side.
///
/// Written timestamps never move backwards: a write stamps the later of
/// the current time and the record's previous `updated_at`.
pub struct CacheEngine {
    /// Record storage
    repository: Arc<dyn Repository>,
    /// Source of values for created and regenerated records
    generator: Arc<dyn ValueGenerator>,
    /// Maximum number of live records (at least 1)
    capacity: usize,
    /// Age at which a fetched record is regenerated instead of renewed
    ttl: Duration,
    /// Serializes engine operations
    state: RwLock<EngineState>,
}

/// Data guarded by the engine lock.
#[derive(Debug, Default)]
struct EngineState {
    stats: CacheStats,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an engine over the given repository and value generator.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of live records, clamped to at least 1
    /// * `ttl_secs` - Renewal window in seconds; 0 regenerates on every fetch
    pub fn new(
        repository: Arc<dyn Repository>,
        generator: Arc<dyn ValueGenerator>,
        capacity: usize,
        ttl_secs: u64,
    ) -> Self {
        if capacity == 0 {
            warn!("capacity of 0 requested, using 1");
        }

        Self {
            repository,
            generator,
            capacity: capacity.max(1),
            ttl: Duration::from_secs(ttl_secs),
            state: RwLock::new(EngineState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Fetch Or Create ==
    /// Returns the record for `key`, creating it if needed.
    ///
    /// - Found and younger than the TTL: timestamp refreshed, value kept.
    /// - Found and at least TTL old: value regenerated, timestamp refreshed.
    /// - Unknown key: a record with a generated value is created, reusing the
    ///   least recently touched slot if the store is full.
    ///
    /// # Errors
    /// [`CacheError::InvalidRequest`] for an empty key; repository failures
    /// are passed through.
    pub async fn fetch_or_create(&self, key: &str) -> Result<Record> {
        if key.is_empty() {
            return Err(CacheError::invalid_request());
        }

        let mut state = self.state.write().await;
        let filter = Filter::key(key);

        if let Some(record) = self.repository.find_one(&filter).await? {
            let now = Utc::now();
            let update = if record.age(now) < self.ttl {
                state.stats.record_hit();
                debug!(key, "renewing record");
                RecordUpdate::touch(now.max(record.updated_at))
            } else {
                state.stats.record_regeneration();
                debug!(key, "regenerating expired record");
                RecordUpdate::value(self.generator.generate(), now.max(record.updated_at))
            };

            self.repository
                .update_one(&filter, update, UpdateOptions::default())
                .await?;
            return self.reload(&filter).await;
        }

        state.stats.record_miss();
        let value = self.generator.generate();

        if self.repository.count().await? < self.capacity {
            debug!(key, "creating record");
            return Ok(self
                .repository
                .create(NewRecord {
                    key: key.to_string(),
                    value,
                    updated_at: Utc::now(),
                })
                .await?);
        }

        self.evict_into(&mut state, key, value).await
    }

    // == Upsert ==
    /// Stores `value` under `key`.
    ///
    /// Updates the record in place if the key exists, otherwise inserts it,
    /// reusing the least recently touched slot if the store is full.
    ///
    /// # Errors
    /// [`CacheError::InvalidRequest`] for an empty key or value; repository
    /// failures are passed through.
    pub async fn upsert(&self, key: &str, value: &str) -> Result<Record> {
        if key.is_empty() || value.is_empty() {
            return Err(CacheError::invalid_request());
        }

        let mut state = self.state.write().await;
        let filter = Filter::key(key);

        let existing = self.repository.find_one(&filter).await?;
        let exists = existing.is_some();
        if exists || self.repository.count().await? < self.capacity {
            let now = Utc::now();
            let stamp = existing.map_or(now, |record| now.max(record.updated_at));
            debug!(key, exists, "upserting record");
            self.repository
                .update_one(
                    &filter,
                    RecordUpdate::value(value, stamp),
                    UpdateOptions::upsert(),
                )
                .await?;
            return self.reload(&filter).await;
        }

        self.evict_into(&mut state, key, value.to_string()).await
    }

    // == Remove By Key ==
    /// Deletes the record for `key`.
    ///
    /// A missing key is not an error. Returns whether a record was removed.
    pub async fn remove_by_key(&self, key: &str) -> Result<bool> {
        if key.is_empty() {
            return Err(CacheError::invalid_request());
        }

        let _guard = self.state.write().await;
        let result = self.repository.delete_one(&Filter::key(key)).await?;
        debug!(key, deleted = result.deleted, "removed record");
        Ok(result.deleted > 0)
    }

    // == Remove All ==
    /// Deletes every record and returns how many were removed.
    pub async fn remove_all(&self) -> Result<u64> {
        let _guard = self.state.write().await;
        let result = self.repository.delete_many(&Filter::All).await?;
        info!(deleted = result.deleted, "cleared all records");
        Ok(result.deleted)
    }

    // == List All ==
    /// Returns every live record in storage order.
    pub async fn list_all(&self) -> Result<Vec<Record>> {
        let _guard = self.state.read().await;
        Ok(self.repository.find(&Filter::All).await?)
    }

    // == Count ==
    /// Returns the number of live records.
    pub async fn count(&self) -> Result<usize> {
        let _guard = self.state.read().await;
        Ok(self.repository.count().await?)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> Result<CacheStats> {
        let guard = self.state.read().await;
        let mut stats = guard.stats.clone();
        stats.set_total_entries(self.repository.count().await?);
        Ok(stats)
    }

    // == Evict Into ==
    /// Reassigns the least recently touched record to `key` and `value`.
    ///
    /// The victim keeps its storage id. Callers hold the write guard.
    async fn evict_into(
        &self,
        state: &mut RwLockWriteGuard<'_, EngineState>,
        key: &str,
        value: String,
    ) -> Result<Record> {
        let records = self.repository.find(&Filter::All).await?;
        let victim = pick_victim(&records).ok_or_else(|| {
            CacheError::Internal("store is at capacity but holds no records".to_string())
        })?;

        let filter = Filter::Id(victim.id);
        self.repository
            .update_one(
                &filter,
                RecordUpdate::reassign(key, value, Utc::now().max(victim.updated_at)),
                UpdateOptions::default(),
            )
            .await?;

        state.stats.record_eviction();
        info!(evicted = %victim.key, key, "reused least recently touched slot");
        self.reload(&filter).await
    }

    /// Re-reads a record just written under the write guard.
    async fn reload(&self, filter: &Filter) -> Result<Record> {
        self.repository.find_one(filter).await?.ok_or_else(|| {
            CacheError::Internal(format!("record matching {:?} missing after write", filter))
        })
    }
}
