//! Cache Module
//!
//! In-process TTL cache with lazy expiry, read-through and substring
//! invalidation.

mod clock;
mod entry;
pub mod keys;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// TTL in seconds applied when a caller does not give one (5 minutes)
pub const DEFAULT_TTL_SECS: u64 = 300;
