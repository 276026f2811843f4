/// A snapshot of the counters of a `LoadingCache`.
///
/// The counters only move when the cache was built with
/// [`CacheBuilder::record_stats`][record-stats].
///
/// - A read that returns a stored value, fresh or due for refresh, is a hit.
/// - Any other read is a miss, including one that waits for another thread's
///   load of the same key.
/// - Only the thread that runs the loader records a load. Reloads are recorded
///   as loads too.
/// - Removals with the cause `Size` or `Expired` are recorded as evictions.
///   Invalidated and replaced entries are not.
///
/// [record-stats]: ../sync/struct.CacheBuilder.html#method.record_stats
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub(crate) hit_count: u64,
    pub(crate) miss_count: u64,
    pub(crate) load_success_count: u64,
    pub(crate) load_failure_count: u64,
    pub(crate) total_load_time_nanos: u64,
    pub(crate) eviction_by_size_count: u64,
    pub(crate) eviction_by_expiration_count: u64,
}

impl CacheStats {
    /// Hits plus misses.
    pub fn request_count(&self) -> u64 {
        self.hit_count.saturating_add(self.miss_count)
    }

    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    pub fn miss_count(&self) -> u64 {
        self.miss_count
    }

    /// The share of reads that were hits, or `1.0` before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.request_count() {
            0 => 1.0,
            n => self.hit_count as f64 / n as f64,
        }
    }

    pub fn load_success_count(&self) -> u64 {
        self.load_success_count
    }

    pub fn load_failure_count(&self) -> u64 {
        self.load_failure_count
    }

    /// Time spent in the loader by successful and failed loads, measured with
    /// the clock of the cache.
    pub fn total_load_time_nanos(&self) -> u64 {
        self.total_load_time_nanos
    }

    /// Mean time of a load, or `0.0` when nothing was loaded.
    pub fn average_load_penalty_nanos(&self) -> f64 {
        match self
            .load_success_count
            .saturating_add(self.load_failure_count)
        {
            0 => 0.0,
            n => self.total_load_time_nanos as f64 / n as f64,
        }
    }

    pub fn eviction_by_size_count(&self) -> u64 {
        self.eviction_by_size_count
    }

    pub fn eviction_by_expiration_count(&self) -> u64 {
        self.eviction_by_expiration_count
    }

    pub fn eviction_count(&self) -> u64 {
        self.eviction_by_size_count
            .saturating_add(self.eviction_by_expiration_count)
    }
}
