//! Cache Statistics Module
//!
//! Point-in-time counts of live and expired entries.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of the entry table, classified against the time it was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries physically present, expired or not
    pub total_keys: usize,
    /// Entries that would still be served by `get`
    pub active_keys: usize,
    /// Entries past their expiry but not yet removed
    pub expired_keys: usize,
}

impl CacheStats {
    /// Builds a snapshot from total and expired counts.
    pub fn new(total_keys: usize, expired_keys: usize) -> Self {
        Self {
            total_keys,
            active_keys: total_keys.saturating_sub(expired_keys),
            expired_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default_is_empty() {
        let stats = CacheStats::default();
        assert_eq!(stats.total_keys, 0);
        assert_eq!(stats.active_keys, 0);
        assert_eq!(stats.expired_keys, 0);
    }

    #[test]
    fn test_stats_active_is_total_minus_expired() {
        let stats = CacheStats::new(7, 3);
        assert_eq!(stats.active_keys, 4);
    }

    #[test]
    fn test_stats_serialize_field_names() {
        let json = serde_json::to_value(CacheStats::new(2, 1)).unwrap();
        assert_eq!(json["total_keys"], 2);
        assert_eq!(json["active_keys"], 1);
        assert_eq!(json["expired_keys"], 1);
    }
}
