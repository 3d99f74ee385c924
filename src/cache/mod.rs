//! Cache Module
//!
//! Bounded key/value cache with TTL renewal and least-recently-touched slot
//! reuse, layered on a [`Repository`](crate::repository::Repository).

mod engine;
mod eviction;
mod record;
mod stats;


// Re-export public types
pub use engine::CacheEngine;
pub use eviction::pick_victim;
pub use record::{Record, RecordId};
pub use stats::CacheStats;
