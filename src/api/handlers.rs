//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HealthResponse, InvalidateRequest,
    InvalidateResponse, SetRequest, SetResponse,
};

/// Application state shared across all handlers.
///
/// The store synchronizes itself, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache store holding JSON payloads
    pub cache: Arc<CacheStore<Value>>,
}

impl AppState {
    /// Creates a new AppState around the given cache store.
    pub fn new(cache: CacheStore<Value>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::new(config.default_ttl))
    }
}

/// Handler for `GET /cache/:key`
///
/// Expired entries are evicted by the read and reported as 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&key)
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;
    let ttl_remaining = state.cache.ttl_remaining(&key);

    Ok(Json(GetResponse::new(key, value, ttl_remaining)))
}

/// Handler for `PUT /cache`
///
/// Stores a JSON value with an optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.unwrap_or_else(|| state.cache.default_ttl());
    state.cache.set_with_ttl(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key, ttl)))
}

/// Handler for `DELETE /cache/:key`
///
/// Succeeds whether or not the key was present.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.cache.delete(&key);
    Json(DeleteResponse::new(key))
}

/// Handler for `DELETE /cache`
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear();
    Json(ClearResponse::new())
}

/// Handler for `POST /cache/invalidate`
///
/// Busts every key containing the given substring.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let removed = state.cache.invalidate_matching(&req.pattern);
    info!(pattern = %req.pattern, removed, "invalidation requested over HTTP");

    Ok(Json(InvalidateResponse::new(req.pattern, removed)))
}

/// Handler for `GET /cache/stats`
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Handler for `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
