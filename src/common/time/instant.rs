use std::time::Duration;

pub(crate) const MAX_NANOS: u64 = u64::MAX - 1;

/// `Instant` represents a point in time read from a cache's `Clock`. It has
/// nanosecond precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Instant {
    elapsed_ns: u64,
}

impl Instant {
    pub(crate) fn from_nanos(nanos: u64) -> Instant {
        Instant {
            elapsed_ns: nanos.min(MAX_NANOS),
        }
    }

    pub(crate) fn as_nanos(&self) -> u64 {
        self.elapsed_ns
    }

    /// Returns the time elapsed from `earlier` to `self`, or zero if `earlier`
    /// is later than `self`.
    ///
    /// A write timestamp can be taken after the `now` of a concurrent reader was
    /// read, so callers must not assume `earlier <= self`.
    pub(crate) fn saturating_duration_since(&self, earlier: Self) -> Duration {
        Duration::from_nanos(self.elapsed_ns.saturating_sub(earlier.elapsed_ns))
    }
}
