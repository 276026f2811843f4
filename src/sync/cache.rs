use super::{
    base_cache::{BaseCache, ReloadFailureListener},
    CacheBuilder, CacheMap, ReloadMode,
};
use crate::{
    common::{
        error::{BoxError, LoadError},
        time::Clock,
    },
    loader::CacheLoader,
    notification::{Configuration, RemovalListener},
    policy::{ExpirationPolicy, Policy},
    stats::CacheStats,
};

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
};

/// A thread-safe concurrent in-memory cache that computes missing values with a
/// [`CacheLoader`][cache-loader].
///
/// A read of a key that has no usable value runs the loader, and stores and
/// returns its result. While a key is being loaded, other threads reading the
/// same key wait for that load instead of starting their own, so the loader runs
/// at most once at a time per key.
///
/// Values can be dropped after a fixed time since they were written
/// (`expire_after_write`) or last read (`expire_after_access`), and reloaded in
/// place once they are older than `refresh_after_write`. A refreshable value is
/// still returned to readers; only an expired one makes them wait for a load.
///
/// # Examples
///
/// ```rust
/// use loading_cache::{loader, sync::LoadingCache};
///
/// use std::thread;
///
/// const NUM_THREADS: usize = 16;
///
/// let cache = LoadingCache::builder()
///     .max_capacity(10_000)
///     .build(loader::from_fn(|key: &usize| -> Result<String, std::io::Error> {
///         // Something expensive, like reading a file.
///         Ok(format!("value {key}"))
///     }));
///
/// let threads: Vec<_> = (0..NUM_THREADS)
///     .map(|i| {
///         // To share the same cache across the threads, clone it.
///         // This is a cheap operation.
///         let my_cache = cache.clone();
///         thread::spawn(move || {
///             // Every thread reads the same 64 keys. Each key is loaded once.
///             for key in 0..64 {
///                 assert_eq!(my_cache.get(&key).unwrap(), format!("value {key}"));
///             }
///             my_cache.invalidate(&i);
///         })
///     })
///     .collect();
///
/// threads.into_iter().for_each(|t| t.join().expect("Failed"));
/// assert_eq!(cache.get_if_present(&(NUM_THREADS + 1)), Some("value 17".to_string()));
/// ```
///
/// # Refresh and expiration
///
/// ```rust
/// use loading_cache::{loader, sync::LoadingCache, ticker::FakeTicker};
///
/// use std::{sync::Arc, time::Duration};
///
/// let ticker = Arc::new(FakeTicker::new());
/// let cache = LoadingCache::builder()
///     .refresh_after_write(Duration::from_secs(60))
///     .expire_after_write(Duration::from_secs(300))
///     .ticker(ticker.clone())
///     .build(loader::from_fn(|key: &String| -> Result<usize, std::io::Error> {
///         Ok(key.len())
///     }));
///
/// assert_eq!(cache.get("alice").unwrap(), 5);
///
/// // Older than the refresh duration. The value is reloaded on this read.
/// ticker.advance(Duration::from_secs(61));
/// assert_eq!(cache.get("alice").unwrap(), 5);
///
/// cache.invalidate("alice");
/// assert_eq!(cache.get_if_present("alice"), None);
/// ```
///
/// # Avoiding to clone the value at `get`
///
/// `get` returns a clone of the stored value, as the value may be replaced or
/// dropped by another thread at any time. Wrap values that are expensive to
/// clone in `std::sync::Arc`.
///
/// [cache-loader]: ../trait.CacheLoader.html
pub struct LoadingCache<K, V, S = RandomState> {
    base: BaseCache<K, V, S>,
}

impl<K, V, S> Clone for LoadingCache<K, V, S> {
    /// Makes a clone of this shared cache.
    ///
    /// This operation is cheap as it only creates thread-safe reference counted
    /// pointers to the shared internal data structures.
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for LoadingCache<K, V, S>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingCache")
            .field("name", &self.base.inner.name())
            .field("size", &self.base.inner.entry_count())
            .field("policy", &self.base.inner.policy())
            .finish()
    }
}

impl<K, V> LoadingCache<K, V, RandomState>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Returns a [`CacheBuilder`][builder-struct], which can build a
    /// `LoadingCache` with various configuration knobs.
    ///
    /// [builder-struct]: ./struct.CacheBuilder.html
    pub fn builder() -> CacheBuilder<K, V, LoadingCache<K, V, RandomState>> {
        CacheBuilder::default()
    }
}

impl<K, V, S> LoadingCache<K, V, S> {
    /// Returns the name of this cache.
    pub fn name(&self) -> Option<&str> {
        self.base.inner.name()
    }

    /// Returns a read-only view of the configuration of this cache.
    pub fn policy(&self) -> Policy {
        self.base.inner.policy()
    }

    /// Returns a snapshot of the statistics of this cache. All counters are zero
    /// unless the cache was built with
    /// [`record_stats`](./struct.CacheBuilder.html#method.record_stats).
    pub fn stats(&self) -> CacheStats {
        self.base.inner.stats()
    }
}

impl<K, V, S> LoadingCache<K, V, S>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_everything(
        name: Option<String>,
        loader: Box<dyn CacheLoader<K, V>>,
        max_capacity: Option<u64>,
        initial_capacity: Option<usize>,
        num_segments: usize,
        build_hasher: S,
        clock: Clock,
        expiration: ExpirationPolicy,
        reload_mode: ReloadMode,
        removal_listener: Option<(RemovalListener<K, V>, Configuration)>,
        reload_failure_listener: Option<ReloadFailureListener<K>>,
        is_recording_stats: bool,
    ) -> Self {
        Self {
            base: BaseCache::new(
                name,
                loader,
                max_capacity,
                initial_capacity,
                num_segments,
                build_hasher,
                clock,
                expiration,
                reload_mode,
                removal_listener,
                reload_failure_listener,
                is_recording_stats,
            ),
        }
    }

    /// Returns a _clone_ of the value corresponding to the key, loading it with
    /// the cache's loader if the key has no usable value.
    ///
    /// If another thread is loading the same key, this call waits for that load
    /// and returns its result. If the value is older than `refresh_after_write`,
    /// it is reloaded according to the [`ReloadMode`][reload-mode] of the cache.
    ///
    /// The key may be any borrowed form of the cache's key type, but `Hash` and
    /// `Eq` on the borrowed form _must_ match those for the key type.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Failed` if the loader returned an error, and
    /// `LoadError::Panicked` if this call waited on a load that panicked.
    ///
    /// # Panics
    ///
    /// Panics if the loader panics when it is run by this call.
    ///
    /// [reload-mode]: ./enum.ReloadMode.html
    pub fn get<Q>(&self, key: &Q) -> Result<V, LoadError>
    where
        K: Borrow<Q>,
        Q: ToOwned<Owned = K> + Hash + Eq + ?Sized,
    {
        self.base.get(key)
    }

    /// Same as [`get`](#method.get), but panics if the value cannot be loaded.
    ///
    /// # Panics
    ///
    /// Panics if the loader returned an error or panicked.
    pub fn get_unchecked<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: ToOwned<Owned = K> + Hash + Eq + ?Sized,
    {
        match self.get(key) {
            Ok(value) => value,
            Err(e) => panic!("Failed to load the value of a key: {e}"),
        }
    }

    /// Returns a _clone_ of the value corresponding to the key, computing it with
    /// `init` instead of the cache's loader if the key has no usable value.
    ///
    /// `init` is also used when the value is reloaded inline by this call. A
    /// reload run in the background uses the cache's loader.
    ///
    /// Loads started by `get` and `get_with` for the same key are not run
    /// concurrently: this call may return the value computed by another
    /// thread's loader, and `init` is not evaluated in that case.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Failed` wrapping the error of `init` or of the load
    /// this call waited on.
    ///
    /// # Example
    ///
    /// ```rust
    /// use loading_cache::{loader, sync::LoadingCache};
    ///
    /// let cache = LoadingCache::builder()
    ///     .build(loader::from_fn(|_: &u32| -> Result<String, std::io::Error> {
    ///         Ok("from loader".to_string())
    ///     }));
    ///
    /// let v = cache.get_with(&1, || -> Result<_, std::io::Error> {
    ///     Ok("from init".to_string())
    /// });
    /// assert_eq!(v.unwrap(), "from init");
    ///
    /// // The value is cached now.
    /// assert_eq!(cache.get(&1).unwrap(), "from init");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `init` panics.
    pub fn get_with<Q, F, E>(&self, key: &Q, init: F) -> Result<V, LoadError>
    where
        K: Borrow<Q>,
        Q: ToOwned<Owned = K> + Hash + Eq + ?Sized,
        F: FnOnce() -> Result<V, E>,
        E: Into<BoxError>,
    {
        self.base.get_with(key, |_, _| init().map_err(Into::into))
    }

    /// Returns a _clone_ of the value corresponding to the key if it is cached
    /// and not expired. Never loads or reloads a value.
    pub fn get_if_present<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.base.inner.get_if_present(key)
    }

    /// Inserts a key-value pair into the cache, replacing any cached value.
    ///
    /// The refresh and expiration timers of the key restart from now. If the key
    /// is being loaded, the loaded value is discarded in favor of this one.
    pub fn put(&self, key: K, value: V) {
        self.base.inner.put(key, value);
    }

    /// Reloads the value of the key, or loads it if the key has no usable value.
    ///
    /// The reload runs on the current thread or on a worker thread according to
    /// the [`ReloadMode`][reload-mode] of the cache. Does nothing if a reload of
    /// the key is already in flight. A failure is not returned; it is logged and
    /// passed to the reload failure listener, and the old value stays cached.
    ///
    /// [reload-mode]: ./enum.ReloadMode.html
    pub fn refresh(&self, key: K) {
        self.base.refresh(key);
    }

    /// Discards the cached value of the key.
    ///
    /// A load of the key in flight is not cancelled; its value is stored when it
    /// completes.
    pub fn invalidate<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.base.inner.invalidate(key);
    }

    /// Discards all cached values.
    ///
    /// The values are invisible to readers as soon as this method starts, and are
    /// removed from the cache before it returns. Loads and reloads in flight are
    /// not cancelled; their values are stored when they complete.
    pub fn invalidate_all(&self) {
        self.base.inner.invalidate_all();
    }

    /// Removes the expired and invalidated entries, sending them to the removal
    /// listener. Such entries are otherwise removed only when their key is read
    /// or written.
    pub fn clean_up(&self) {
        self.base.inner.clean_up();
    }

    /// Returns the approximate number of entries in this cache. It may include
    /// expired entries that were not removed yet.
    pub fn size(&self) -> u64 {
        self.base.inner.entry_count()
    }

    /// Returns a view of this cache as a map. Operations on the view never run
    /// the loader.
    pub fn as_map(&self) -> CacheMap<K, V, S> {
        CacheMap::new(self.base.clone())
    }
}
