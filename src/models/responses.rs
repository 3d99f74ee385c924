//! Response DTOs for the key/value server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for DELETE /records/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was removed
    pub key: String,
    /// Whether a record was present
    pub deleted: bool,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>, deleted: bool) -> Self {
        let key = key.into();
        let message = if deleted {
            format!("Key '{}' deleted successfully", key)
        } else {
            format!("Key '{}' was not present", key)
        };
        Self {
            message,
            key,
            deleted,
        }
    }
}

/// Response body for DELETE /records
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of records removed
    pub deleted: u64,
}

impl ClearResponse {
    pub fn new(deleted: u64) -> Self {
        Self {
            message: format!("Deleted {} records", deleted),
            deleted,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Fetches that renewed a warm record
    pub hits: u64,
    /// Fetches that regenerated an expired record
    pub regenerations: u64,
    /// Fetches of an unknown key
    pub misses: u64,
    /// Slot reuses
    pub evictions: u64,
    /// Current number of records
    pub total_entries: usize,
    /// Share of fetches served by a resident record
    pub hit_rate: f64,
    /// Maximum number of records
    pub capacity: usize,
    /// Renewal window in seconds
    pub ttl: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, capacity: usize, ttl: u64) -> Self {
        Self {
            hits: stats.hits,
            regenerations: stats.regenerations,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            capacity,
            ttl,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("deleted_key", true);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("deleted_key"));
        assert!(json.contains("deleted successfully"));
    }

    #[test]
    fn test_delete_response_absent_key() {
        let resp = DeleteResponse::new("ghost", false);
        assert!(!resp.deleted);
        assert!(resp.message.contains("not present"));
    }

    #[test]
    fn test_clear_response() {
        let resp = ClearResponse::new(3);
        assert_eq!(resp.deleted, 3);
        assert_eq!(resp.message, "Deleted 3 records");
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 60,
            regenerations: 20,
            misses: 20,
            evictions: 5,
            total_entries: 10,
        };
        let resp = StatsResponse::new(&stats, 10, 60);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.capacity, 10);
        assert_eq!(resp.ttl, 60);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"message\""));
        assert!(json.contains("Something went wrong"));
    }
}
