//! Request DTOs for the key/value server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the upsert operation (POST /records)
///
/// Missing fields deserialize as empty strings so they are rejected by the
/// engine's validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertRequest {
    /// The record key
    #[serde(default)]
    pub key: String,
    /// The value to store
    #[serde(default)]
    pub value: String,
}
