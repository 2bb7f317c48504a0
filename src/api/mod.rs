//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `PUT /cache` - Store a JSON value
//! - `DELETE /cache` - Clear every entry
//! - `GET /cache/stats` - Entry counts
//! - `POST /cache/invalidate` - Remove keys containing a substring
//! - `GET /cache/:key` - Retrieve a value by key
//! - `DELETE /cache/:key` - Delete a key
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
