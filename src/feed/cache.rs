use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

/// A response cache with a per-entry time-to-live, keyed by request
/// parameters. A fresh hit bypasses the network entirely.
#[derive(Debug, Default)]
pub struct FeedCache {
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    payload: serde_json::Value,
    stored_at: DateTime<Utc>,
    ttl: TimeDelta,
}

impl FeedCache {
    pub fn new() -> Self { Self::default() }

    /// Returns the cached payload for `key` if it is still fresh at `now`.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<serde_json::Value> {
        let entry = self.entries.get(key)?;
        if now - entry.stored_at < entry.ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Stores a payload under `key` with the given time-to-live.
    pub fn put(
        &mut self,
        key: String,
        payload: serde_json::Value,
        ttl: TimeDelta,
        now: DateTime<Utc>,
    ) {
        self.entries.insert(key, CacheEntry { payload, stored_at: now, ttl });
    }

    /// Drops all entries that are no longer fresh at `now`.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|_, entry| now - entry.stored_at < entry.ttl);
    }

    pub fn clear(&mut self) { self.entries.clear(); }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
