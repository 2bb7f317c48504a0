//! Mart Cache - in-process TTL cache for the mart POS service
//!
//! Shields the database from repeated read-mostly queries (dashboard
//! counters, reports) with time-based expiry, read-through helpers and
//! substring invalidation. An optional admin HTTP surface exposes the store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheStats, CacheStore};
pub use config::Config;
