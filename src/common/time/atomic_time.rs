use super::Instant;

use std::sync::atomic::{AtomicU64, Ordering};

/// `AtomicInstant` is a wrapper around `AtomicU64` that provides thread-safe access
/// to an `Instant`.
#[derive(Debug)]
pub(crate) struct AtomicInstant {
    instant: AtomicU64,
}

impl AtomicInstant {
    pub(crate) fn new(instant: Instant) -> Self {
        Self {
            instant: AtomicU64::new(instant.as_nanos()),
        }
    }

    pub(crate) fn instant(&self) -> Instant {
        Instant::from_nanos(self.instant.load(Ordering::Acquire))
    }

    /// Moves the stored `Instant` forward to `instant`. Never moves it backwards,
    /// so a slow reader holding an older `now` cannot undo a newer access.
    pub(crate) fn advance_to(&self, instant: Instant) {
        self.instant.fetch_max(instant.as_nanos(), Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::{AtomicInstant, Instant};

    #[test]
    fn advance_never_goes_backwards() {
        let ai = AtomicInstant::new(Instant::from_nanos(10));
        ai.advance_to(Instant::from_nanos(20));
        assert_eq!(ai.instant(), Instant::from_nanos(20));

        ai.advance_to(Instant::from_nanos(15));
        assert_eq!(ai.instant(), Instant::from_nanos(20));
    }
}
