//! API Handlers
//!
//! HTTP request handlers translating each endpoint into a cache engine call.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheEngine, Record};
use crate::error::Result;
use crate::models::{ClearResponse, DeleteResponse, HealthResponse, StatsResponse, UpsertRequest};

/// Application state shared across all handlers.
///
/// The engine does its own locking, so the state only needs an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CacheEngine>,
}

impl AppState {
    /// Creates a new AppState around the given engine.
    pub fn new(engine: CacheEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Handler for GET /records
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.engine.list_all().await?))
}

/// Handler for GET /records/:key
///
/// Returns the record for the key, creating, renewing or regenerating it.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Record>> {
    Ok(Json(state.engine.fetch_or_create(&key).await?))
}

/// Handler for POST /records
///
/// A missing, malformed or wrongly typed body is treated as an empty request
/// so it is rejected by the engine with the usual invalid request error.
pub async fn upsert_handler(
    State(state): State<AppState>,
    body: Option<Json<UpsertRequest>>,
) -> Result<Json<Record>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    Ok(Json(state.engine.upsert(&req.key, &req.value).await?))
}

/// Handler for DELETE /records/:key
///
/// Succeeds whether or not the key was present.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.engine.remove_by_key(&key).await?;
    Ok(Json(DeleteResponse::new(key, deleted)))
}

/// Handler for DELETE /records
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let deleted = state.engine.remove_all().await?;
    Ok(Json(ClearResponse::new(deleted)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.engine.stats().await?;
    Ok(Json(StatsResponse::new(
        &stats,
        state.engine.capacity(),
        state.engine.ttl().as_secs(),
    )))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::generator::RandomValueGenerator;
    use crate::repository::InMemoryRepository;

    fn test_state(capacity: usize) -> AppState {
        AppState::new(CacheEngine::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(RandomValueGenerator::default()),
            capacity,
            300,
        ))
    }

    fn upsert_request(key: &str, value: &str) -> Option<Json<UpsertRequest>> {
        Some(Json(UpsertRequest {
            key: key.to_string(),
            value: value.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_upsert_and_fetch_handler() {
        let state = test_state(100);

        let result =
            upsert_handler(State(state.clone()), upsert_request("test_key", "test_value")).await;
        assert!(result.is_ok());

        let response = fetch_handler(State(state.clone()), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "test_value");
    }

    #[tokio::test]
    async fn test_fetch_handler_creates_missing_key() {
        let state = test_state(100);

        let response = fetch_handler(State(state.clone()), Path("nonexistent".to_string()))
            .await
            .unwrap();
        assert_eq!(response.key, "nonexistent");
        assert_eq!(response.value.len(), 10);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state(100);
        let stored = upsert_handler(State(state.clone()), upsert_request("to_delete", "value"))
            .await
            .unwrap();
        assert_eq!(stored.key, "to_delete");

        let response = delete_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert!(response.deleted);

        let response = delete_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert!(!response.deleted);

        let records = list_handler(State(state)).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = test_state(100);
        for (key, value) in [("a", "1"), ("b", "2")] {
            let stored = upsert_handler(State(state.clone()), upsert_request(key, value))
                .await
                .unwrap();
            assert_eq!(stored.value, value);
        }

        let response = clear_handler(State(state.clone())).await.unwrap();
        assert_eq!(response.deleted, 2);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state(7);
        let created = fetch_handler(State(state.clone()), Path("k".to_string()))
            .await
            .unwrap();
        assert_eq!(created.key, "k");

        let response = stats_handler(State(state)).await.unwrap();
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 1);
        assert_eq!(response.total_entries, 1);
        assert_eq!(response.capacity, 7);
        assert_eq!(response.ttl, 300);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_upsert_invalid_request() {
        let state = test_state(100);

        let result = upsert_handler(State(state), upsert_request("", "value")).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_upsert_without_body() {
        let state = test_state(100);

        let result = upsert_handler(State(state.clone()), None).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));

        let records = list_handler(State(state)).await.unwrap();
        assert!(records.is_empty());
    }
}
