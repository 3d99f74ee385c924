//! Request and Response models for the key/value server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies. Records
//! themselves serialize directly from [`Record`](crate::cache::Record).

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::UpsertRequest;
pub use responses::{ClearResponse, DeleteResponse, ErrorResponse, HealthResponse, StatsResponse};
