//! Mini KV - A bounded key/value server
//!
//! Fetches renew or regenerate records based on age; a full store reuses the
//! slot of its least recently touched record.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod repository;

pub use api::AppState;
pub use cache::{CacheEngine, Record};
pub use config::Config;
pub use error::{CacheError, Result};
pub use generator::{RandomValueGenerator, ValueGenerator};
pub use repository::{InMemoryRepository, Repository};
