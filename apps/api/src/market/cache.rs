//! Process-local response cache for the job-search API.
//!
//! Entries expire one hour after they were fetched and are overwritten on the
//! next miss. There is no eviction and no size bound. Two requests that miss
//! on the same key at the same time both call through; the upstream API is
//! idempotent so the later write simply wins.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde_json::Value;
use tokio::time::Instant;

pub const JOB_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Composite cache key: every parameter that changes the upstream result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobQuery {
    pub query: String,
    pub location: String,
    pub employment_type: Option<String>,
    pub date_posted: String,
    pub page: u32,
}

struct CacheEntry {
    value: Arc<Value>,
    fetched_at: Instant,
}

pub struct JobCache {
    entries: DashMap<JobQuery, CacheEntry>,
    ttl: Duration,
}

impl Default for JobCache {
    fn default() -> Self {
        Self::new(JOB_CACHE_TTL)
    }
}

impl JobCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// The cached response for `key` if it is younger than the TTL.
    pub fn get(&self, key: &JobQuery) -> Option<Arc<Value>> {
        let entry = self.entries.get(key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(Arc::clone(&entry.value))
        } else {
            None
        }
    }

    pub fn insert(&self, key: JobQuery, value: Arc<Value>) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
