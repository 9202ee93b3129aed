#![forbid(unsafe_code)]

//! Expiring document cache with a backward-compatible legacy-schema read path.
//!
//! Resolved documents are stored as JSON `{data, timestamp, expiry}` in a
//! string key-value store keyed by the normalized [`StreamKey`] rendering.
//! Lookups never error: a miss, an expired entry, or a corrupt entry all
//! resolve to `None` (deleting the offending value as a side effect).
//!
//! [`StreamKey`]: exegete_wire::StreamKey

mod cache;
mod store;

pub use cache::{DEFAULT_TTL, ExpiringCache};
pub use store::{KeyValueStore, MemoryStore};
