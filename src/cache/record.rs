//! Record Module
//!
//! Defines the single entity held by the store.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stable storage identity of a record.
///
/// Assigned by the repository on insert. A slot-reuse eviction changes the
/// record's key, value and timestamp but keeps its id.
pub type RecordId = u64;

// == Record ==
/// A key/value/timestamp triple, the unit of storage.
///
/// Serializes to `{ "key", "value", "updatedAt" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Storage identity, not part of the wire shape
    #[serde(skip)]
    pub id: RecordId,
    /// Unique key among live records
    pub key: String,
    /// Opaque payload
    pub value: String,
    /// Refreshed on every create, touch, regeneration and update
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Returns how long ago the record was last written, relative to `now`.
    ///
    /// A timestamp in the future (clock adjusted backwards) counts as zero age.
    pub fn age(&self, now: DateTime<Utc>) -> std::time::Duration {
        (now - self.updated_at).to_std().unwrap_or_default()
    }
}
