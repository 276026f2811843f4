use super::CacheStats;
use crate::notification::RemovalCause;

use crossbeam_utils::{atomic::AtomicCell, CachePadded};

fn saturating_add(counter: &AtomicCell<u64>, value: u64) {
    let mut v0 = counter.load();
    loop {
        let v1 = v0.saturating_add(value);
        match counter.compare_exchange(v0, v1) {
            Ok(_) => break,
            Err(v2) => v0 = v2,
        }
    }
}

pub(crate) trait StatsCounter {
    #[allow(unused_variables)]
    fn record_hits(&self, count: u32) {}

    #[allow(unused_variables)]
    fn record_misses(&self, count: u32) {}

    #[allow(unused_variables)]
    fn record_load_success(&self, load_time_nanos: u64) {}

    #[allow(unused_variables)]
    fn record_load_failure(&self, load_time_nanos: u64) {}

    #[allow(unused_variables)]
    fn record_removal(&self, cause: RemovalCause) {}

    fn snapshot(&self) -> CacheStats;
}

/// A `StatsCounter` that does not record any cache events.
#[derive(Default)]
pub(crate) struct DisabledStatsCounter;

impl StatsCounter for DisabledStatsCounter {
    fn snapshot(&self) -> CacheStats {
        // Return a `CacheStats` with all fields set to 0.
        CacheStats::default()
    }
}

#[derive(Default)]
pub(crate) struct ConcurrentStatsCounter {
    request: CachePadded<RequestCounter>,
    load: CachePadded<LoadCounter>,
    eviction: CachePadded<EvictionCounter>,
}

#[derive(Default)]
struct RequestCounter {
    hit_count: AtomicCell<u64>,
    miss_count: AtomicCell<u64>,
}

#[derive(Default)]
struct LoadCounter {
    load_success_count: AtomicCell<u64>,
    load_failure_count: AtomicCell<u64>,
    total_load_time: AtomicCell<u64>,
}

#[derive(Default)]
struct EvictionCounter {
    by_size_count: AtomicCell<u64>,
    by_expiration_count: AtomicCell<u64>,
}

impl StatsCounter for ConcurrentStatsCounter {
    fn record_hits(&self, count: u32) {
        saturating_add(&self.request.hit_count, count as u64);
    }

    fn record_misses(&self, count: u32) {
        saturating_add(&self.request.miss_count, count as u64);
    }

    fn record_load_success(&self, load_time_nanos: u64) {
        saturating_add(&self.load.load_success_count, 1);
        saturating_add(&self.load.total_load_time, load_time_nanos);
    }

    fn record_load_failure(&self, load_time_nanos: u64) {
        saturating_add(&self.load.load_failure_count, 1);
        saturating_add(&self.load.total_load_time, load_time_nanos);
    }

    fn record_removal(&self, cause: RemovalCause) {
        match cause {
            RemovalCause::Size => saturating_add(&self.eviction.by_size_count, 1),
            RemovalCause::Expired => saturating_add(&self.eviction.by_expiration_count, 1),
            _ => (),
        }
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hit_count: self.request.hit_count.load(),
            miss_count: self.request.miss_count.load(),
            load_success_count: self.load.load_success_count.load(),
            load_failure_count: self.load.load_failure_count.load(),
            total_load_time_nanos: self.load.total_load_time.load(),
            eviction_by_size_count: self.eviction.by_size_count.load(),
            eviction_by_expiration_count: self.eviction.by_expiration_count.load(),
        }
    }
}
