//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for `PUT /cache`
///
/// # Fields
/// - `key`: The cache key, used verbatim
/// - `value`: Any JSON payload
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Request body for `POST /cache/invalidate`
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    /// Literal substring; every key containing it is removed
    pub pattern: String,
}

impl InvalidateRequest {
    /// Rejects the empty pattern, which would match every key.
    pub fn validate(&self) -> Option<String> {
        if self.pattern.is_empty() {
            return Some("Pattern cannot be empty; use DELETE /cache to clear".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "dashboard:stats", "value": {"products": 12}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "dashboard:stats");
        assert_eq!(req.value, json!({"products": 12}));
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": 3.5, "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(60));
    }

    #[test]
    fn test_set_request_rejects_negative_ttl() {
        let json = r#"{"key": "test", "value": 1, "ttl": -1}"#;
        assert!(serde_json::from_str::<SetRequest>(json).is_err());
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: Value::Null,
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            key: "analytics:top_products:5".to_string(),
            value: json!([1, 2, 3]),
            ttl: Some(0),
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_invalidate_request_validation() {
        let empty = InvalidateRequest {
            pattern: String::new(),
        };
        assert!(empty.validate().is_some());

        let scoped: InvalidateRequest = serde_json::from_str(r#"{"pattern":"dashboard"}"#).unwrap();
        assert!(scoped.validate().is_none());
    }
}
