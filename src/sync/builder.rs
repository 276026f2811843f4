use super::{base_cache::ReloadFailureListener, LoadingCache};
use crate::{
    common::{concurrent::constants::DEFAULT_NUM_SEGMENTS, error::LoadError, time::Clock},
    loader::CacheLoader,
    notification::{Configuration, RemovalCause, RemovalListener},
    policy::ExpirationPolicy,
    ticker::Ticker,
};

use std::{
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
    marker::PhantomData,
    sync::Arc,
    time::Duration,
};

/// Specifies where a reload of a refreshable value runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReloadMode {
    /// The reader that found the value refreshable runs the reload on its own
    /// thread and receives the reloaded value. If the reload fails, the reader
    /// receives the old value. Concurrent readers of the same key do not wait:
    /// they receive the old value. This is the default.
    #[default]
    Inline,
    /// The reload is submitted to a worker thread pool shared by all caches, and
    /// the reader receives the old value right away.
    Background,
}

/// Builds a [`LoadingCache`][loading-cache] with various configuration knobs.
///
/// [loading-cache]: ./struct.LoadingCache.html
///
/// # Examples
///
/// ```rust
/// use loading_cache::{loader, sync::LoadingCache};
///
/// use std::time::Duration;
///
/// let cache = LoadingCache::builder()
///     // Reload a value on the first read after it is 1 minute old.
///     .refresh_after_write(Duration::from_secs(60))
///     // Drop a value that was not rewritten for 10 minutes.
///     .expire_after_write(Duration::from_secs(10 * 60))
///     .max_capacity(10_000)
///     .build(loader::from_fn(|key: &u32| -> Result<String, std::num::TryFromIntError> {
///         Ok(u8::try_from(*key)?.to_string())
///     }));
///
/// assert_eq!(cache.get(&42).unwrap(), "42");
/// assert!(cache.get(&1_000).is_err());
/// ```
///
#[must_use]
pub struct CacheBuilder<K, V, C> {
    name: Option<String>,
    max_capacity: Option<u64>,
    initial_capacity: Option<usize>,
    num_segments: Option<usize>,
    refresh_after_write: Option<Duration>,
    expire_after_write: Option<Duration>,
    expire_after_access: Option<Duration>,
    ticker: Option<Arc<dyn Ticker>>,
    removal_listener: Option<(RemovalListener<K, V>, Configuration)>,
    reload_mode: ReloadMode,
    reload_failure_listener: Option<ReloadFailureListener<K>>,
    is_recording_stats: bool,
    cache_type: PhantomData<C>,
}

impl<K, V> Default for CacheBuilder<K, V, LoadingCache<K, V, RandomState>>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self {
            name: None,
            max_capacity: None,
            initial_capacity: None,
            num_segments: None,
            refresh_after_write: None,
            expire_after_write: None,
            expire_after_access: None,
            ticker: None,
            removal_listener: None,
            reload_mode: ReloadMode::default(),
            reload_failure_listener: None,
            is_recording_stats: false,
            cache_type: PhantomData,
        }
    }
}

impl<K, V> CacheBuilder<K, V, LoadingCache<K, V, RandomState>>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Construct a new `CacheBuilder` that will be used to build a
    /// `LoadingCache` with no size bound and no time-based policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a `LoadingCache<K, V>` that computes values with `loader`.
    ///
    /// # Panics
    ///
    /// Panics if both `refresh_after_write` and `expire_after_write` are set and
    /// the expiration duration is shorter than the refresh duration.
    pub fn build(self, loader: impl CacheLoader<K, V>) -> LoadingCache<K, V, RandomState> {
        self.build_with_hasher(loader, RandomState::default())
    }

    /// Builds a `LoadingCache<K, V, S>` that computes values with `loader`, with
    /// the given `hasher`.
    ///
    /// # Panics
    ///
    /// Panics if both `refresh_after_write` and `expire_after_write` are set and
    /// the expiration duration is shorter than the refresh duration.
    pub fn build_with_hasher<S>(
        self,
        loader: impl CacheLoader<K, V>,
        hasher: S,
    ) -> LoadingCache<K, V, S>
    where
        S: BuildHasher + Clone + Send + Sync + 'static,
    {
        if let (Some(refresh), Some(expire)) = (self.refresh_after_write, self.expire_after_write)
        {
            assert!(
                expire >= refresh,
                "expire_after_write ({expire:?}) must not be shorter than \
                 refresh_after_write ({refresh:?})"
            );
        }

        let clock = match self.ticker {
            Some(ticker) => Clock::with_ticker(ticker),
            None => Clock::default(),
        };
        let expiration = ExpirationPolicy::new(
            self.refresh_after_write,
            self.expire_after_write,
            self.expire_after_access,
        );

        LoadingCache::with_everything(
            self.name,
            Box::new(loader),
            self.max_capacity,
            self.initial_capacity,
            self.num_segments.unwrap_or(DEFAULT_NUM_SEGMENTS),
            hasher,
            clock,
            expiration,
            self.reload_mode,
            self.removal_listener,
            self.reload_failure_listener,
            self.is_recording_stats,
        )
    }
}

impl<K, V, C> CacheBuilder<K, V, C> {
    /// Sets the name of the cache. The name is used in log messages.
    pub fn name(self, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..self
        }
    }

    /// Sets the max capacity of the cache. When the cache is over capacity, the
    /// least recently accessed entries are evicted.
    ///
    /// The bound is enforced per segment, so the cache may evict an entry while
    /// it holds slightly fewer than `max_capacity` entries in total.
    pub fn max_capacity(self, max_capacity: u64) -> Self {
        Self {
            max_capacity: Some(max_capacity),
            ..self
        }
    }

    /// Sets the initial capacity (number of entries) of the cache.
    pub fn initial_capacity(self, number_of_entries: usize) -> Self {
        Self {
            initial_capacity: Some(number_of_entries),
            ..self
        }
    }

    /// Sets the number of segments of the cache. It is rounded up to a power of
    /// two, and reduced when `max_capacity` is too small for that many segments.
    ///
    /// # Panics
    ///
    /// Panics if `num_segments` is zero.
    pub fn segments(self, num_segments: usize) -> Self {
        assert!(num_segments > 0);

        Self {
            num_segments: Some(num_segments),
            ..self
        }
    }

    /// Sets the refresh duration of the cache. A value read more than `duration`
    /// after it was written is returned and reloaded.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is zero.
    pub fn refresh_after_write(self, duration: Duration) -> Self {
        assert!(!duration.is_zero(), "refresh_after_write must be positive");

        Self {
            refresh_after_write: Some(duration),
            ..self
        }
    }

    /// Sets the time to live of the cache. A value is dropped once `duration`
    /// has passed since it was written (loaded, reloaded or `put`).
    pub fn expire_after_write(self, duration: Duration) -> Self {
        Self {
            expire_after_write: Some(duration),
            ..self
        }
    }

    /// Sets the time to idle of the cache. A value is dropped once `duration`
    /// has passed since it was last read or written.
    pub fn expire_after_access(self, duration: Duration) -> Self {
        Self {
            expire_after_access: Some(duration),
            ..self
        }
    }

    /// Sets the source of time of the cache. Mostly useful with a
    /// [`FakeTicker`][fake-ticker] in tests.
    ///
    /// [fake-ticker]: ../ticker/struct.FakeTicker.html
    pub fn ticker(self, ticker: Arc<dyn Ticker>) -> Self {
        Self {
            ticker: Some(ticker),
            ..self
        }
    }

    /// Sets the removal listener closure. It is called with the key, the value
    /// and the cause of each removal, on a worker thread.
    pub fn removal_listener(
        self,
        listener: impl Fn(Arc<K>, V, RemovalCause) + Send + Sync + 'static,
    ) -> Self {
        self.removal_listener_with_conf(listener, Configuration::default())
    }

    /// Sets the removal listener closure with a [`Configuration`][conf] that
    /// chooses how notifications are delivered.
    ///
    /// [conf]: ../notification/struct.Configuration.html
    pub fn removal_listener_with_conf(
        self,
        listener: impl Fn(Arc<K>, V, RemovalCause) + Send + Sync + 'static,
        conf: Configuration,
    ) -> Self {
        Self {
            removal_listener: Some((Arc::new(listener), conf)),
            ..self
        }
    }

    /// Sets where reloads of refreshable values run. The default is
    /// [`ReloadMode::Inline`].
    pub fn reload_mode(self, mode: ReloadMode) -> Self {
        Self {
            reload_mode: mode,
            ..self
        }
    }

    /// Sets a closure called when a reload fails. The old value stays in the
    /// cache in that case, so the error is never returned to a reader.
    pub fn reload_failure_listener(
        self,
        listener: impl Fn(&K, &LoadError) + Send + Sync + 'static,
    ) -> Self {
        Self {
            reload_failure_listener: Some(Arc::new(listener)),
            ..self
        }
    }

    /// Enables the statistics returned by `LoadingCache::stats`.
    pub fn record_stats(self) -> Self {
        Self {
            is_recording_stats: true,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheBuilder, ReloadMode};
    use crate::{loader, sync::LoadingCache};

    use std::time::Duration;

    fn len_loader() -> impl crate::CacheLoader<String, usize> {
        loader::from_fn(|key: &String| -> Result<usize, std::convert::Infallible> { Ok(key.len()) })
    }

    #[test]
    fn build_cache() {
        let cache: LoadingCache<String, usize> = CacheBuilder::new().build(len_loader());
        let policy = cache.policy();

        assert_eq!(policy.max_capacity(), None);
        assert_eq!(policy.refresh_after_write(), None);
        assert_eq!(policy.expire_after_write(), None);
        assert_eq!(policy.expire_after_access(), None);
        assert_eq!(policy.num_segments(), 16);
        assert_eq!(cache.name(), None);

        assert_eq!(cache.get("alice").unwrap(), 5);

        let cache: LoadingCache<String, usize> = CacheBuilder::new()
            .name("lengths")
            .max_capacity(100)
            .refresh_after_write(Duration::from_secs(5 * 60))
            .expire_after_write(Duration::from_secs(45 * 60))
            .expire_after_access(Duration::from_secs(15 * 60))
            .segments(3)
            .reload_mode(ReloadMode::Background)
            .build(len_loader());
        let policy = cache.policy();

        assert_eq!(policy.max_capacity(), Some(100));
        assert_eq!(policy.refresh_after_write(), Some(Duration::from_secs(5 * 60)));
        assert_eq!(policy.expire_after_write(), Some(Duration::from_secs(45 * 60)));
        assert_eq!(policy.expire_after_access(), Some(Duration::from_secs(15 * 60)));
        // 3 is rounded up to 4, and 4 * 20 <= 100.
        assert_eq!(policy.num_segments(), 4);
        assert_eq!(cache.name(), Some("lengths"));

        assert_eq!(cache.get("bob").unwrap(), 3);
    }

    #[test]
    fn small_capacity_reduces_segments() {
        let cache: LoadingCache<String, usize> = CacheBuilder::new()
            .max_capacity(30)
            .segments(16)
            .build(len_loader());
        assert_eq!(cache.policy().num_segments(), 1);
    }

    #[test]
    #[should_panic(expected = "must not be shorter than")]
    fn expire_shorter_than_refresh_panics() {
        let _cache: LoadingCache<String, usize> = CacheBuilder::new()
            .refresh_after_write(Duration::from_secs(10))
            .expire_after_write(Duration::from_secs(5))
            .build(len_loader());
    }

    #[test]
    #[should_panic(expected = "refresh_after_write must be positive")]
    fn zero_refresh_panics() {
        let _builder =
            CacheBuilder::<String, usize, _>::new().refresh_after_write(Duration::ZERO);
    }

    #[test]
    fn default_reload_mode_is_inline() {
        assert_eq!(ReloadMode::default(), ReloadMode::Inline);
    }
}
