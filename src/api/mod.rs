//! API Module
//!
//! HTTP handlers and routing for the key/value server REST API.
//!
//! # Endpoints
//! - `GET /records` - List every record
//! - `POST /records` - Create or update a record
//! - `DELETE /records` - Remove every record
//! - `GET /records/:key` - Fetch a record, creating it if missing
//! - `DELETE /records/:key` - Remove a record
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
