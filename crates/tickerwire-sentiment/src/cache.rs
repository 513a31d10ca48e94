//! In-process memoization with lazy time-based expiry.
//!
//! Each cache owns its map behind a mutex that is only held for the map
//! operation itself, never across a computation or an `.await`. Two tasks
//! missing on the same key may both compute and both insert; since values
//! for a key are deterministic the second insert is a harmless overwrite.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::types::{ResultKey, ResultSetRecord, SentimentRecord};

/// Polarity scores keyed by the exact text they were computed from.
pub type SentimentCache = TtlCache<String, SentimentRecord>;

/// Filtered result sets keyed by `(subject, company name, target count)`.
pub type ResultCache = TtlCache<ResultKey, Arc<ResultSetRecord>>;

struct Entry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

/// A map whose entries expire `ttl` after insertion.
///
/// With `ttl = None` entries live until [`TtlCache::clear`] or process exit.
/// Expired entries are invisible to [`TtlCache::get`] but keep their memory
/// until overwritten or reclaimed by [`TtlCache::sweep`].
pub struct TtlCache<K, V> {
    ttl: Option<TimeDelta>,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty cache. A `ttl` too large to represent is treated as no expiry.
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl: ttl.and_then(|d| TimeDelta::from_std(d).ok()),
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl.and_then(|d| d.to_std().ok())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.get_at(key, Utc::now())
    }

    /// Look up `key` as of `now`. Expired entries read as absent.
    pub fn get_at<Q>(&self, key: &Q, now: DateTime<Utc>) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let entries = self.lock();
        entries
            .get(key)
            .filter(|entry| !self.is_expired(entry.inserted_at, now))
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Utc::now());
    }

    /// Store `value` under `key`, stamped with `now`, replacing any previous entry.
    pub fn insert_at(&self, key: K, value: V, now: DateTime<Utc>) {
        self.lock().insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Remove every expired entry; returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry.inserted_at, now));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn is_expired(&self, inserted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.ttl.is_some_and(|ttl| now - inserted_at >= ttl)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<V>>> {
        // A panic while holding the lock cannot leave a half-written entry,
        // so the map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}
