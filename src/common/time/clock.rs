use std::sync::Arc;

use super::Instant;
use crate::ticker::{SystemTicker, Ticker};

#[derive(Clone)]
pub(crate) struct Clock {
    ty: ClockType,
}

#[derive(Clone)]
enum ClockType {
    /// A clock that reads the operating system's monotonic time.
    System(Arc<SystemTicker>),
    /// A clock that reads a user provided `Ticker`, such as a `FakeTicker`.
    Custom(Arc<dyn Ticker>),
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            ty: ClockType::System(Arc::new(SystemTicker::new())),
        }
    }
}

impl Clock {
    pub(crate) fn with_ticker(ticker: Arc<dyn Ticker>) -> Self {
        Self {
            ty: ClockType::Custom(ticker),
        }
    }

    /// Returns the current time read from the underlying ticker.
    pub(crate) fn now(&self) -> Instant {
        let nanos = match &self.ty {
            ClockType::System(ticker) => ticker.read(),
            ClockType::Custom(ticker) => ticker.read(),
        };
        Instant::from_nanos(nanos)
    }

    #[cfg(test)]
    pub(crate) fn is_custom(&self) -> bool {
        matches!(self.ty, ClockType::Custom(_))
    }
}

#[cfg(test)]
mod tests {
    use super::Clock;
    use crate::ticker::FakeTicker;

    use std::{sync::Arc, time::Duration};

    #[test]
    fn custom_clock_follows_ticker() {
        let ticker = Arc::new(FakeTicker::new());
        let clock = Clock::with_ticker(ticker.clone());
        assert!(clock.is_custom());
        assert_eq!(clock.now().as_nanos(), 0);

        ticker.advance(Duration::from_millis(2));
        assert_eq!(clock.now().as_nanos(), 2_000_000);
    }

    #[test]
    fn default_clock_is_system() {
        let clock = Clock::default();
        assert!(!clock.is_custom());
        let t1 = clock.now();
        let t2 = clock.now();
        assert!(t2 >= t1);
    }
}
