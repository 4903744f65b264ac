// Two-tier search cache.
// Memory tier for the session, durable tier across restarts, write-through with read-time expiry.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::RawResult;
use crate::error::{CacheCorruptionError, Result};

use super::key::CacheKey;
use super::store::{DurableRecord, DurableStore};

/// Maximum age of a cached search: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached raw results for one quantized coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub results: Vec<RawResult>,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry has reached `ttl` at `now`.
    /// A timestamp in the future (clock skew) counts as fresh.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let age = now
            .signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        age >= ttl
    }
}

/// Search result cache keyed by quantized coordinate.
///
/// Reads prefer the memory tier. A durable hit is promoted into memory; an
/// expired or unreadable durable entry is deleted and reported as a miss.
/// Callers always receive copies.
pub struct SearchCache<D> {
    memory: HashMap<CacheKey, CacheEntry>,
    durable: D,
    ttl: Duration,
}

impl<D: DurableStore> SearchCache<D> {
    pub fn new(durable: D) -> Self {
        Self::with_ttl(durable, DEFAULT_TTL)
    }

    pub fn with_ttl(durable: D, ttl: Duration) -> Self {
        Self {
            memory: HashMap::new(),
            durable,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    /// Fresh entry for `key`, if either tier holds one.
    pub fn get(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        self.get_at(key, Utc::now())
    }

    pub(crate) fn get_at(&mut self, key: &CacheKey, now: DateTime<Utc>) -> Option<CacheEntry> {
        if let Some(entry) = self.memory.get(key) {
            if !entry.is_expired(self.ttl, now) {
                debug!(%key, "memory cache hit");
                return Some(entry.clone());
            }
            debug!(%key, "memory cache entry expired");
            self.memory.remove(key);
        }

        let entry = self.read_durable(key)?;
        if entry.is_expired(self.ttl, now) {
            debug!(%key, stored_at = %entry.stored_at, "durable cache entry expired");
            self.invalidate(key);
            return None;
        }

        debug!(%key, "durable cache hit, promoting");
        self.memory.insert(key.clone(), entry.clone());
        Some(entry)
    }

    /// Store `results` under `key` in both tiers, replacing any previous entry.
    pub fn put(&mut self, key: &CacheKey, results: Vec<RawResult>) {
        self.put_at(key, results, Utc::now());
    }

    pub(crate) fn put_at(&mut self, key: &CacheKey, results: Vec<RawResult>, now: DateTime<Utc>) {
        let now = truncate_to_millis(now);
        // Never move an entry's timestamp backwards.
        let stored_at = match self.previous_stored_at(key) {
            Some(previous) if previous > now => previous,
            _ => now,
        };

        let record = DurableRecord {
            timestamp: stored_at.timestamp_millis(),
            data: results,
        };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.durable.write(key.as_str(), &json) {
                    warn!(%key, error = %e, "failed to write durable cache entry");
                }
            }
            Err(e) => warn!(%key, error = %e, "failed to serialize cache entry"),
        }

        debug!(%key, count = record.data.len(), "cached search results");
        self.memory.insert(
            key.clone(),
            CacheEntry {
                key: key.clone(),
                results: record.data,
                stored_at,
            },
        );
    }

    /// Remove `key` from both tiers.
    pub fn invalidate(&mut self, key: &CacheKey) {
        self.memory.remove(key);
        if let Err(e) = self.durable.remove(key.as_str()) {
            warn!(%key, error = %e, "failed to remove durable cache entry");
        }
    }

    /// Remove every entry from both tiers.
    pub fn clear(&mut self) -> Result<()> {
        self.memory.clear();
        self.durable.clear()?;
        Ok(())
    }

    fn previous_stored_at(&self, key: &CacheKey) -> Option<DateTime<Utc>> {
        if let Some(entry) = self.memory.get(key) {
            return Some(entry.stored_at);
        }
        let raw = self.durable.read(key.as_str()).ok()??;
        let record: DurableRecord = serde_json::from_str(&raw).ok()?;
        DateTime::from_timestamp_millis(record.timestamp)
    }

    /// Load a durable entry, dropping it if it cannot be parsed.
    fn read_durable(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        match self.parse_durable(key) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(%key, error = %e, "discarding corrupt durable cache entry");
                self.invalidate(key);
                None
            }
        }
    }

    fn parse_durable(
        &self,
        key: &CacheKey,
    ) -> std::result::Result<Option<CacheEntry>, CacheCorruptionError> {
        let Some(raw) = self.durable.read(key.as_str())? else {
            return Ok(None);
        };
        let record: DurableRecord = serde_json::from_str(&raw)?;

        // Out-of-range timestamps are treated as already expired.
        let stored_at = DateTime::from_timestamp_millis(record.timestamp)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Ok(Some(CacheEntry {
            key: key.clone(),
            results: record.data,
            stored_at,
        }))
    }
}

fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}
