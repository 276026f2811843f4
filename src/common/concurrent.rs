use crate::common::time::{AtomicInstant, Instant};

use std::sync::atomic::{AtomicBool, Ordering};
use triomphe::Arc as TrioArc;

pub(crate) mod constants;
pub(crate) mod thread_pool;

/// A cached value with its timestamps.
///
/// The value and the write timestamp never change after construction. Writing a
/// new value for a key installs a new `ValueEntry`, so a reader holding an entry
/// always sees a consistent value/timestamp pair.
pub(crate) struct ValueEntry<V> {
    pub(crate) value: V,
    write_time: Instant,
    last_accessed: AtomicInstant,
    generation: u64,
    is_refreshing: AtomicBool,
}

impl<V> ValueEntry<V> {
    pub(crate) fn new(value: V, now: Instant, generation: u64) -> TrioArc<Self> {
        TrioArc::new(Self {
            value,
            write_time: now,
            last_accessed: AtomicInstant::new(now),
            generation,
            is_refreshing: AtomicBool::new(false),
        })
    }

    #[inline]
    pub(crate) fn write_time(&self) -> Instant {
        self.write_time
    }

    #[inline]
    pub(crate) fn last_accessed(&self) -> Instant {
        self.last_accessed.instant()
    }

    #[inline]
    pub(crate) fn touch(&self, now: Instant) {
        self.last_accessed.advance_to(now);
    }

    /// The invalidation generation this entry was installed in.
    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Claims the right to reload this entry. Returns `false` if another reload
    /// of this entry is still in flight.
    pub(crate) fn try_claim_refresh(&self) -> bool {
        self.is_refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn release_refresh(&self) {
        self.is_refreshing.store(false, Ordering::Release);
    }

    pub(crate) fn is_refreshing(&self) -> bool {
        self.is_refreshing.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::ValueEntry;
    use crate::common::time::Instant;

    #[test]
    fn refresh_claim_is_exclusive() {
        let entry = ValueEntry::new("v", Instant::from_nanos(0), 0);
        assert!(!entry.is_refreshing());
        assert!(entry.try_claim_refresh());
        assert!(!entry.try_claim_refresh());
        assert!(entry.is_refreshing());

        entry.release_refresh();
        assert!(entry.try_claim_refresh());
    }

    #[test]
    fn touch_updates_last_accessed_only() {
        let entry = ValueEntry::new(1, Instant::from_nanos(10), 3);
        entry.touch(Instant::from_nanos(25));
        assert_eq!(entry.write_time(), Instant::from_nanos(10));
        assert_eq!(entry.last_accessed(), Instant::from_nanos(25));
        assert_eq!(entry.generation(), 3);
    }
}
