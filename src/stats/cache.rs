//! Stats Cache Module
//!
//! Memoizes the stats snapshot for a fixed window.
//!
//! The cache is Cold (no memo) or Warm (memo younger than the TTL). Expiry
//! is checked lazily against the injected clock on each request; any
//! mutation of the document, whether through the store or an external edit
//! picked up by the watcher, calls [`StatsCache::invalidate`].

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Duration;
use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;
use crate::stats::{EmptyStatsPolicy, StatsSnapshot};
use crate::store::ItemStore;

/// Default snapshot lifetime in seconds.
pub const DEFAULT_STATS_TTL_SECS: i64 = 5 * 60;

#[derive(Debug, Default)]
struct CacheState {
    memo: Option<StatsSnapshot>,
    /// Bumped on every invalidation. A recompute that started under an
    /// older generation must not install its result.
    generation: u64,
}

// == Stats Cache ==
pub struct StatsCache {
    store: Arc<ItemStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    empty_policy: EmptyStatsPolicy,
    state: Mutex<CacheState>,
}

impl StatsCache {
    // == Constructor ==
    pub fn new(
        store: Arc<ItemStore>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
        empty_policy: EmptyStatsPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            ttl,
            empty_policy,
            state: Mutex::new(CacheState::default()),
        }
    }

    // == Get ==
    /// Returns the memoized snapshot while warm, otherwise recomputes.
    ///
    /// A failed recompute leaves the cache cold and returns the error.
    pub async fn get(&self) -> Result<StatsSnapshot> {
        let generation = {
            let state = self.lock_state();
            if let Some(memo) = state.memo.as_ref().filter(|m| self.is_fresh(m)) {
                debug!("Serving stats from cache");
                return Ok(memo.clone());
            }
            state.generation
        };

        debug!("Calculating fresh stats");
        let items = self.store.load_all().await?;
        let snapshot = StatsSnapshot::compute(&items, self.clock.now(), self.empty_policy)?;

        let mut state = self.lock_state();
        if state.generation == generation {
            state.memo = Some(snapshot.clone());
        }
        Ok(snapshot)
    }

    // == Invalidate ==
    /// Drops the memo; the next `get` recomputes.
    pub fn invalidate(&self) {
        let mut state = self.lock_state();
        state.memo = None;
        state.generation = state.generation.wrapping_add(1);
    }

    // == Is Warm ==
    /// True when a memo exists and is within the TTL.
    pub fn is_warm(&self) -> bool {
        self.lock_state()
            .memo
            .as_ref()
            .is_some_and(|memo| self.is_fresh(memo))
    }

    fn is_fresh(&self, memo: &StatsSnapshot) -> bool {
        self.clock.now() - memo.cached_at < self.ttl
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
