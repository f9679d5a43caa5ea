//! Time-to-live fetch memoization.
//!
//! Repeated fetches inside the refresh interval serve the previously
//! computed result without re-hitting the network; once the interval
//! lapses, the next fetch goes out and resets the timer. A manual refresh
//! invalidates the slot so the next fetch is always real.

use std::time::{Duration, Instant};

use crate::models::FetchResult;
use crate::source::ReleaseFetcher;

/// A single-slot cache holding the last value and when it was stored.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Option<(Instant, T)>,
}

impl<T> TtlCache<T> {
    /// Create an empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    /// The cached value, if one is present and still fresh.
    pub fn get(&self) -> Option<&T> {
        match &self.slot {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value),
            _ => None,
        }
    }

    /// Store a value and reset the timer.
    pub fn store(&mut self, value: T) {
        self.slot = Some((Instant::now(), value));
    }

    /// Drop the cached value so the next access misses.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

/// TTL-memoizing wrapper around [`ReleaseFetcher`].
///
/// Not designed for concurrent overlapping calls; the monitor runs one
/// fetch at a time.
pub struct CachedFetcher {
    fetcher: ReleaseFetcher,
    cache: TtlCache<FetchResult>,
}

impl CachedFetcher {
    /// Wrap a fetcher with the given time-to-live.
    pub fn new(fetcher: ReleaseFetcher, ttl: Duration) -> Self {
        Self {
            fetcher,
            cache: TtlCache::new(ttl),
        }
    }

    /// Return the memoized result while fresh, otherwise fetch anew.
    ///
    /// Error results are memoized too: a failing source is not re-polled
    /// until the interval lapses or the cache is invalidated.
    pub async fn fetch(&mut self) -> FetchResult {
        if let Some(cached) = self.cache.get() {
            log::debug!("Serving fetch result from cache");
            return cached.clone();
        }

        let result = self.fetcher.fetch().await;
        self.cache.store(result.clone());
        result
    }

    /// Force the next fetch to hit the network (manual refresh trigger).
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}
