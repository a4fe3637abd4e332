//! Extraction cache
//!
//! Bounded LRU keyed by the full content string. Each entry records the
//! date it was extracted on, because the derived birthday date depends on
//! "today"; an entry from another day is treated as a miss.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

use crate::extract::ParsedContent;

/// Default number of cached extractions
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
struct CacheEntry {
    today: NaiveDate,
    parsed: Arc<ParsedContent>,
}

/// Counters for cache observability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Memoizes [`ParsedContent`] per content string.
///
/// A capacity of zero disables caching: every lookup misses and nothing is stored.
pub struct ExtractionCache {
    entries: Option<Mutex<LruCache<String, CacheEntry>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for ExtractionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for ExtractionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionCache").field("stats", &self.stats()).finish()
    }
}

impl ExtractionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, content: &str, today: NaiveDate) -> Option<Arc<ParsedContent>> {
        let found = self.entries.as_ref().and_then(|entries| {
            let mut entries = entries.lock();
            match entries.get(content) {
                Some(entry) if entry.today == today => Some(Arc::clone(&entry.parsed)),
                _ => None,
            }
        });

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(len = content.len(), "Extraction cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(len = content.len(), "Extraction cache miss");
        }
        found
    }

    pub fn insert(&self, content: String, today: NaiveDate, parsed: Arc<ParsedContent>) {
        if let Some(entries) = &self.entries {
            entries.lock().put(content, CacheEntry { today, parsed });
        }
    }

    /// Return the cached extraction or compute and store it
    pub fn get_or_insert_with<F>(&self, content: &str, today: NaiveDate, extract: F) -> Arc<ParsedContent>
    where
        F: FnOnce() -> ParsedContent,
    {
        if let Some(parsed) = self.get(content, today) {
            return parsed;
        }
        let parsed = Arc::new(extract());
        self.insert(content.to_string(), today, Arc::clone(&parsed));
        parsed
    }

    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            entries.lock().clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        let (len, capacity) = self.entries.as_ref().map_or((0, 0), |entries| {
            let entries = entries.lock();
            (entries.len(), entries.cap().get())
        });
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len,
            capacity,
        }
    }
}
