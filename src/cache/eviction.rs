//! Eviction Module
//!
//! Picks the record whose slot gets reused when the store is full.

use crate::cache::Record;

// == Pick Victim ==
/// Returns the least recently touched record.
///
/// Oldest `updated_at` wins; records sharing that timestamp are ordered by
/// key, smallest first. Returns None for an empty slice.
pub fn pick_victim(records: &[Record]) -> Option<&Record> {
    records.iter().min_by(|a, b| {
        a.updated_at
            .cmp(&b.updated_at)
            .then_with(|| a.key.cmp(&b.key))
    })
}
