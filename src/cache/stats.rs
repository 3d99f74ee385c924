//! Cache Statistics Module
//!
//! Tracks how fetches were served and how often slots were reused.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Fetches that found a warm record and renewed it
    pub hits: u64,
    /// Fetches that found an expired record and regenerated its value
    pub regenerations: u64,
    /// Fetches of an unknown key
    pub misses: u64,
    /// Records whose slot was reused for a different key
    pub evictions: u64,
    /// Current number of live records
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the share of fetches served by an existing record.
    ///
    /// Regenerations count as hits since the key was resident. Returns 0.0
    /// if no fetches have been made.
    pub fn hit_rate(&self) -> f64 {
        let resident = self.hits + self.regenerations;
        let total = resident + self.misses;
        if total == 0 {
            0.0
        } else {
            resident as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_regeneration(&mut self) {
        self.regenerations += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
