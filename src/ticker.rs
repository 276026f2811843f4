//! Sources of time for a cache.
//!
//! A [`Ticker`] returns the number of nanoseconds elapsed since some fixed but
//! arbitrary point in time. The cache only compares readings taken from the same
//! ticker, so the origin does not matter, but readings must never go backwards.
//!
//! By default a cache reads time from the [`SystemTicker`]. Tests that need to
//! control the passage of time can install a [`FakeTicker`] through
//! [`CacheBuilder::ticker`][builder-ticker] and advance it explicitly.
//!
//! [builder-ticker]: ../sync/struct.CacheBuilder.html#method.ticker

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// A monotonic source of time with nanosecond resolution.
pub trait Ticker: Send + Sync + 'static {
    /// Returns the number of nanoseconds elapsed since this ticker's fixed point
    /// of reference.
    fn read(&self) -> u64;
}

/// A [`Ticker`] backed by the operating system's monotonic clock.
///
/// When the `quanta` feature is enabled (the default), readings are taken with
/// `quanta::Instant`, which can be cheaper than `std::time::Instant` on some
/// CPU architectures.
pub struct SystemTicker {
    #[cfg(feature = "quanta")]
    origin: quanta::Instant,
    #[cfg(not(feature = "quanta"))]
    origin: std::time::Instant,
}

impl SystemTicker {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "quanta")]
            origin: quanta::Instant::now(),
            #[cfg(not(feature = "quanta"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SystemTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemTicker").finish()
    }
}

impl Ticker for SystemTicker {
    fn read(&self) -> u64 {
        saturating_nanos(self.origin.elapsed())
    }
}

/// A [`Ticker`] whose time only moves when told to.
///
/// `FakeTicker` is thread safe, so one thread may advance it while others read
/// the cache. An optional auto-increment step advances the time on every
/// reading.
///
/// # Example
///
/// ```rust
/// use loading_cache::ticker::{FakeTicker, Ticker};
/// use std::time::Duration;
///
/// let ticker = FakeTicker::new();
/// assert_eq!(ticker.read(), 0);
///
/// ticker.advance(Duration::from_millis(3));
/// assert_eq!(ticker.read(), 3_000_000);
/// ```
#[derive(Default)]
pub struct FakeTicker {
    nanos: AtomicU64,
    auto_increment_nanos: AtomicU64,
}

impl FakeTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the time forward by `amount`.
    pub fn advance(&self, amount: Duration) {
        self.nanos
            .fetch_add(saturating_nanos(amount), Ordering::AcqRel);
    }

    /// Makes every subsequent reading advance the time by `step` after it is
    /// taken. A zero step disables auto-increment.
    pub fn set_auto_increment_step(&self, step: Duration) {
        self.auto_increment_nanos
            .store(saturating_nanos(step), Ordering::Release);
    }
}

impl fmt::Debug for FakeTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeTicker")
            .field("nanos", &self.nanos.load(Ordering::Acquire))
            .finish()
    }
}

impl Ticker for FakeTicker {
    fn read(&self) -> u64 {
        let step = self.auto_increment_nanos.load(Ordering::Acquire);
        self.nanos.fetch_add(step, Ordering::AcqRel)
    }
}

fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
