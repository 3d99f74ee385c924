//! Repository Module
//!
//! Storage capability the cache engine is built on. The engine only talks to
//! the [`Repository`] trait; how records are persisted is up to the
//! implementation.
//!
//! # Implementations
//! - [`InMemoryRepository`] - reference implementation, also used in tests

mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::cache::{Record, RecordId};

pub use memory::InMemoryRepository;

// == Repository Error ==
/// Failures surfaced by a repository implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Backing store could not be reached
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    /// Write would leave two live records with the same key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Write was structurally invalid for this store
    #[error("Invalid write: {0}")]
    Invalid(String),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

// == Filter ==
/// Selects the records an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every live record
    All,
    /// The record with this key
    Key(String),
    /// The record with this storage identity
    Id(RecordId),
}

impl Filter {
    /// Shorthand for [`Filter::Key`].
    pub fn key(key: impl Into<String>) -> Self {
        Filter::Key(key.into())
    }

    /// Returns true if `record` is selected by this filter.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::All => true,
            Filter::Key(key) => record.key == *key,
            Filter::Id(id) => record.id == *id,
        }
    }
}

// == Write Payloads ==
/// Fields of a record to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub key: Option<String>,
    pub value: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RecordUpdate {
    /// Refreshes the timestamp and leaves the value alone.
    pub fn touch(now: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(now),
            ..Self::default()
        }
    }

    /// Replaces the value and refreshes the timestamp.
    pub fn value(value: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            value: Some(value.into()),
            updated_at: Some(now),
            ..Self::default()
        }
    }

    /// Reassigns the whole identity of a slot: key, value and timestamp.
    pub fn reassign(key: impl Into<String>, value: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            updated_at: Some(now),
        }
    }
}

/// Options for [`Repository::update_one`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Insert a record when nothing matches the filter
    pub upsert: bool,
}

impl UpdateOptions {
    pub fn upsert() -> Self {
        Self { upsert: true }
    }
}

// == Write Results ==
/// Outcome of [`Repository::update_one`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// Records matched by the filter (0 or 1)
    pub matched: u64,
    /// Records actually changed
    pub modified: u64,
    /// Id of the record inserted by an upsert, if any
    pub upserted_id: Option<RecordId>,
}

/// Outcome of a delete operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteResult {
    /// Number of records removed
    pub deleted: u64,
}

// == Repository Trait ==
/// Persistent record storage consumed by the cache engine.
///
/// Each call completes or fails atomically from the caller's point of view.
/// Implementations enforce key uniqueness among live records. The trait is
/// object safe so the engine can hold an `Arc<dyn Repository>`.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Returns the first record matching `filter`.
    async fn find_one(&self, filter: &Filter) -> RepositoryResult<Option<Record>>;

    /// Returns every record matching `filter`, in storage order.
    async fn find(&self, filter: &Filter) -> RepositoryResult<Vec<Record>>;

    /// Inserts a record and returns it with its assigned id.
    ///
    /// # Errors
    /// [`RepositoryError::DuplicateKey`] if a live record already uses the key.
    async fn create(&self, record: NewRecord) -> RepositoryResult<Record>;

    /// Applies `update` to the first record matching `filter`.
    ///
    /// With `options.upsert` set and nothing matched, inserts a new record
    /// instead. The inserted key is the update's key, or the filter's key
    /// for [`Filter::Key`].
    async fn update_one(
        &self,
        filter: &Filter,
        update: RecordUpdate,
        options: UpdateOptions,
    ) -> RepositoryResult<UpdateResult>;

    /// Removes the first record matching `filter`.
    async fn delete_one(&self, filter: &Filter) -> RepositoryResult<DeleteResult>;

    /// Removes every record matching `filter`.
    async fn delete_many(&self, filter: &Filter) -> RepositoryResult<DeleteResult>;

    /// Returns the number of live records.
    async fn count(&self) -> RepositoryResult<usize>;
}
