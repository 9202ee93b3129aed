#![forbid(unsafe_code)]

use std::{
    marker::PhantomData,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use exegete_wire::StreamKey;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::store::{KeyValueStore, MemoryStore};

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Current on-store schema. Timestamps are absolute epoch milliseconds;
/// an entry is valid iff `now < expiry`.
#[derive(Debug, Deserialize)]
struct StoredEntry<D> {
    data: D,
    #[expect(dead_code)]
    timestamp: u64,
    expiry: u64,
}

#[derive(Serialize)]
struct StoredEntryRef<'a, D> {
    data: &'a D,
    timestamp: u64,
    expiry: u64,
}

/// Keyed store of previously resolved documents with time-based expiry.
///
/// Values that predate the wrapper schema (a bare document at top level) are
/// accepted on read and transparently rewritten as current-schema entries
/// with a fresh TTL window; the original store time is not preserved.
#[derive(Debug, Clone)]
pub struct ExpiringCache<D, S = MemoryStore> {
    store: S,
    ttl: Duration,
    _marker: PhantomData<fn() -> D>,
}

impl<D, S> ExpiringCache<D, S>
where
    D: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Creates a cache with [`DEFAULT_TTL`].
    pub fn new(store: S) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    pub fn with_ttl(store: S, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the unexpired document for `key`, or `None`.
    ///
    /// Never errors: expiry and corruption both delete the entry and miss.
    pub fn lookup(&self, key: &StreamKey) -> Option<D> {
        self.lookup_at(key, now_ms())
    }

    /// Stores `value` under the current schema with a full TTL window.
    pub fn write(&self, key: &StreamKey, value: &D) {
        self.write_at(key, value, now_ms());
    }

    /// [`lookup`](Self::lookup) against an explicit clock, for deterministic
    /// expiry tests.
    pub fn lookup_at(&self, key: &StreamKey, now: u64) -> Option<D> {
        let raw = self.store.get(key.as_str())?;

        match serde_json::from_str::<StoredEntry<D>>(&raw) {
            Ok(entry) if now < entry.expiry => Some(entry.data),
            Ok(_) => {
                debug!(key = %key, "cache entry expired");
                self.store.remove(key.as_str());
                None
            }
            Err(_) => match serde_json::from_str::<D>(&raw) {
                Ok(data) => {
                    debug!(key = %key, "legacy cache entry upgraded");
                    self.write_at(key, &data, now);
                    Some(data)
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "corrupt cache entry dropped");
                    self.store.remove(key.as_str());
                    None
                }
            },
        }
    }

    /// [`write`](Self::write) against an explicit clock.
    pub fn write_at(&self, key: &StreamKey, value: &D, now: u64) {
        let entry = StoredEntryRef {
            data: value,
            timestamp: now,
            expiry: now + self.ttl.as_millis() as u64,
        };
        match serde_json::to_string(&entry) {
            Ok(json) => self.store.set(key.as_str(), json),
            Err(err) => warn!(key = %key, error = %err, "failed to serialize cache entry"),
        }
    }

    /// Drops the entry for `key`, if any.
    pub fn invalidate(&self, key: &StreamKey) {
        self.store.remove(key.as_str());
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
