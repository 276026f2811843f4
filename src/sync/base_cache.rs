use super::{
    builder::ReloadMode,
    table::{EntryTable, Shard, Slot},
    value_initializer::{self, Claim, InitResult, Waiter},
};
use crate::{
    common::{
        concurrent::{
            constants::MIN_ENTRIES_PER_SEGMENT,
            thread_pool::{PoolName, ThreadPool, ThreadPoolRegistry},
            ValueEntry,
        },
        error::{BoxError, LoadError},
        time::{Clock, Instant},
    },
    loader::CacheLoader,
    notification::{
        notifier::{RemovalNotifier, RemovedEntry},
        Configuration, RemovalCause, RemovalListener,
    },
    policy::{ExpirationPolicy, Freshness, Policy},
    stats::{
        stats_counter::{ConcurrentStatsCounter, DisabledStatsCounter, StatsCounter},
        CacheStats,
    },
};

use smallvec::SmallVec;
use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
    sync::Arc,
};
use triomphe::Arc as TrioArc;

pub(crate) type ReloadFailureListener<K> = Arc<dyn Fn(&K, &LoadError) + Send + Sync + 'static>;

type RemovedEntries<K, V> = SmallVec<[RemovedEntry<K, V>; 2]>;

/// A usable entry found by a read.
enum Found<K, V> {
    Fresh(V),
    Refreshable(Arc<K>, TrioArc<ValueEntry<V>>),
}

pub(crate) struct BaseCache<K, V, S = RandomState> {
    pub(crate) inner: Arc<Inner<K, V, S>>,
}

impl<K, V, S> Clone for BaseCache<K, V, S> {
    /// Makes a clone of this shared cache.
    ///
    /// This operation is cheap as it only creates thread-safe reference counted
    /// pointers to the shared internal data structures.
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, S> BaseCache<K, V, S>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
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
        let num_segments = effective_num_segments(num_segments, max_capacity);
        let segment_capacity = max_capacity.map(|cap| {
            let n = num_segments as u64;
            let per_segment = cap / n + u64::from(cap % n != 0);
            usize::try_from(per_segment).unwrap_or(usize::MAX)
        });
        let table = EntryTable::new(num_segments, initial_capacity, segment_capacity, build_hasher);

        let removal_notifier = removal_listener
            .map(|(listener, conf)| RemovalNotifier::new(listener, conf, name.clone()));
        let refresher = match reload_mode {
            ReloadMode::Inline => None,
            ReloadMode::Background => Some(ThreadPoolRegistry::acquire_pool(PoolName::Refresher)),
        };
        let stats: Box<dyn StatsCounter + Send + Sync> = if is_recording_stats {
            Box::<ConcurrentStatsCounter>::default()
        } else {
            Box::new(DisabledStatsCounter)
        };

        let inner = Inner {
            name,
            table,
            loader,
            clock,
            expiration,
            max_capacity,
            reload_mode,
            refresher,
            removal_notifier,
            reload_failure_listener,
            stats,
            is_recording_stats,
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Result<V, LoadError>
    where
        K: Borrow<Q>,
        Q: ToOwned<Owned = K> + Hash + Eq + ?Sized,
    {
        let loader = &self.inner.loader;
        self.get_with(key, |k, old| match old {
            Some(old) => loader.reload(k, old),
            None => loader.load(k),
        })
    }

    /// Returns the value of `key`, computing it with `compute` when the key has
    /// no usable value. `compute` receives the stale value when it is called for
    /// an inline reload.
    pub(crate) fn get_with<Q, F>(&self, key: &Q, compute: F) -> Result<V, LoadError>
    where
        K: Borrow<Q>,
        Q: ToOwned<Owned = K> + Hash + Eq + ?Sized,
        F: FnOnce(&K, Option<&V>) -> Result<V, BoxError>,
    {
        let inner = &self.inner;
        let hash = inner.table.hash(key);
        let now = inner.clock.now();

        match inner.lookup(hash, key, now) {
            Some(Found::Fresh(value)) => {
                inner.stats.record_hits(1);
                Ok(value)
            }
            Some(Found::Refreshable(key, entry)) => {
                inner.stats.record_hits(1);
                Ok(self.refresh_entry(key, hash, entry, |k, old| compute(k, Some(old))))
            }
            None => inner.load(hash, Arc::new(key.to_owned()), |k| compute(k, None)),
        }
    }

    /// Reloads `key` if it has a usable value, or loads it otherwise. Failures
    /// are logged and passed to the reload failure listener.
    pub(crate) fn refresh(&self, key: K) {
        let inner = Arc::clone(&self.inner);
        let hash = inner.table.hash(&key);
        let key = Arc::new(key);

        match inner.find_visible(hash, &*key) {
            Some(entry) => {
                if entry.try_claim_refresh() {
                    self.spawn(move || {
                        inner.reload_and_install(&key, hash, &entry, |k, old| {
                            inner.loader.reload(k, old)
                        });
                    });
                }
            }
            None => self.spawn(move || {
                use std::panic::{catch_unwind, AssertUnwindSafe};

                let result = catch_unwind(AssertUnwindSafe(|| {
                    inner.load(hash, Arc::clone(&key), |k| inner.loader.load(k))
                }))
                .unwrap_or(Err(LoadError::Panicked));
                if let Err(err) = result {
                    inner.on_reload_failure(&key, &err);
                }
            }),
        }
    }

    fn refresh_entry(
        &self,
        key: Arc<K>,
        hash: u64,
        entry: TrioArc<ValueEntry<V>>,
        reload: impl FnOnce(&K, &V) -> Result<V, BoxError>,
    ) -> V {
        if !entry.try_claim_refresh() {
            // Another thread is reloading it.
            return entry.value.clone();
        }

        match self.inner.reload_mode {
            ReloadMode::Inline => self
                .inner
                .reload_and_install(&key, hash, &entry, reload)
                .unwrap_or_else(|| entry.value.clone()),
            ReloadMode::Background => {
                let value = entry.value.clone();
                let inner = Arc::clone(&self.inner);
                self.spawn(move || {
                    inner.reload_and_install(&key, hash, &entry, |k, old| {
                        inner.loader.reload(k, old)
                    });
                });
                value
            }
        }
    }

    /// Runs `task` on the refresher pool, or on the current thread when reloads
    /// are inline.
    fn spawn(&self, task: impl FnOnce() + Send + 'static) {
        match &self.inner.refresher {
            Some(pool) => {
                pool.pool.execute(task);
            }
            None => task(),
        }
    }
}

/// Removal notifications that are delivered when this is dropped, also when a
/// loader panic unwinds through it.
struct DeferredRemovals<'a, K, V, S>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    inner: &'a Inner<K, V, S>,
    entries: RemovedEntries<K, V>,
}

impl<K, V, S> Drop for DeferredRemovals<'_, K, V, S>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            self.inner.notify(std::mem::take(&mut self.entries));
        }
    }
}

//
// private
//
fn effective_num_segments(requested: usize, max_capacity: Option<u64>) -> usize {
    let mut num_segments = requested.max(1).next_power_of_two();
    if let Some(cap) = max_capacity {
        // Keep enough entries per segment for the eviction order to mean
        // something.
        while num_segments > 1 && (num_segments as u64) * MIN_ENTRIES_PER_SEGMENT > cap {
            num_segments /= 2;
        }
    }
    num_segments
}

pub(crate) struct Inner<K, V, S> {
    name: Option<String>,
    table: EntryTable<K, V, S>,
    loader: Box<dyn CacheLoader<K, V>>,
    clock: Clock,
    expiration: ExpirationPolicy,
    max_capacity: Option<u64>,
    reload_mode: ReloadMode,
    refresher: Option<Arc<ThreadPool>>,
    removal_notifier: Option<RemovalNotifier<K, V>>,
    reload_failure_listener: Option<ReloadFailureListener<K>>,
    stats: Box<dyn StatsCounter + Send + Sync>,
    is_recording_stats: bool,
}

impl<K, V, S> Drop for Inner<K, V, S> {
    fn drop(&mut self) {
        if let Some(pool) = self.refresher.take() {
            ThreadPoolRegistry::release_pool(&pool);
        }
    }
}

impl<K, V, S> Inner<K, V, S> {
    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn policy(&self) -> Policy {
        Policy::new(self.max_capacity, self.table.num_segments(), self.expiration)
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

impl<K, V, S> Inner<K, V, S>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Must be called after the shard lock is released.
    fn notify(&self, removed: impl IntoIterator<Item = RemovedEntry<K, V>>) {
        if let Some(notifier) = &self.removal_notifier {
            notifier.notify_all(removed);
        }
    }
}

impl<K, V, S> Inner<K, V, S>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher,
{
    pub(crate) fn entry_count(&self) -> u64 {
        self.table.entry_count()
    }

    fn lookup<Q>(&self, hash: u64, key: &Q, now: Instant) -> Option<Found<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let shard = self.table.segment(hash).read();
        let (k, slot) = shard.find(hash, key)?;
        let entry = slot.as_ready()?;
        match self
            .expiration
            .classify(entry, now, self.table.generation())
        {
            Freshness::Fresh => {
                entry.touch(now);
                Some(Found::Fresh(entry.value.clone()))
            }
            Freshness::Refreshable => {
                entry.touch(now);
                Some(Found::Refreshable(Arc::clone(k), TrioArc::clone(entry)))
            }
            Freshness::Stale(_) => None,
        }
    }

    /// Returns the entry of `key` if it is visible and unexpired. Does not count
    /// as an access.
    fn find_visible<Q>(&self, hash: u64, key: &Q) -> Option<TrioArc<ValueEntry<V>>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let now = self.clock.now();
        let shard = self.table.segment(hash).read();
        let entry = shard.find(hash, key)?.1.as_ready()?;
        match self
            .expiration
            .classify(entry, now, self.table.generation())
        {
            Freshness::Stale(_) => None,
            Freshness::Fresh | Freshness::Refreshable => Some(TrioArc::clone(entry)),
        }
    }

    pub(crate) fn get_if_present<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.table.hash(key);
        let value = match self.lookup(hash, key, self.clock.now()) {
            Some(Found::Fresh(value)) => Some(value),
            Some(Found::Refreshable(_, entry)) => Some(entry.value.clone()),
            None => None,
        };
        if value.is_some() {
            self.stats.record_hits(1);
        } else {
            self.stats.record_misses(1);
        }
        value
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_visible(self.table.hash(key), key).is_some()
    }

    /// Loads the value of `key` unless another thread is already loading it, in
    /// which case waits for that load.
    fn load(
        &self,
        hash: u64,
        key: Arc<K>,
        init: impl FnOnce(&K) -> Result<V, BoxError>,
    ) -> Result<V, LoadError> {
        let started = self.load_started();
        // Our waiter is write-locked until `try_init_or_read` returns, so the
        // entry it displaced is reported after that. A listener may read the key.
        let mut displaced = DeferredRemovals {
            inner: self,
            entries: RemovedEntries::new(),
        };
        let result = value_initializer::try_init_or_read(
            |waiter| self.claim_slot(hash, &key, waiter, &mut displaced.entries),
            || init(&*key),
            |waiter, result| self.complete_load(hash, &key, waiter, started, result),
        );
        std::mem::drop(displaced);

        match result {
            InitResult::Found(value) => {
                self.stats.record_hits(1);
                Ok(value)
            }
            InitResult::Initialized(value) | InitResult::ReadExisting(value) => {
                self.stats.record_misses(1);
                Ok(value)
            }
            InitResult::InitErr(e) => {
                self.stats.record_misses(1);
                Err(e)
            }
        }
    }

    /// Installs `waiter` as the placeholder of `key` unless the key has a usable
    /// value or a load in flight. An invisible or expired entry is displaced and
    /// pushed to `removed`, which must not be delivered while `waiter` is locked.
    fn claim_slot(
        &self,
        hash: u64,
        key: &Arc<K>,
        waiter: &Waiter<V>,
        removed: &mut RemovedEntries<K, V>,
    ) -> Claim<V> {
        let mut shard = self.table.segment(hash).write();
        let now = self.clock.now();
        match shard.find(hash, &**key).map(|(_, slot)| slot.clone()) {
            Some(Slot::Loading(other)) => Claim::Wait(other),
            Some(Slot::Ready(entry)) => {
                match self
                    .expiration
                    .classify(&entry, now, self.table.generation())
                {
                    Freshness::Stale(cause) => {
                        let placeholder = Slot::Loading(TrioArc::clone(waiter));
                        shard.insert(hash, Arc::clone(key), placeholder);
                        self.push_removal(removed, key, &entry.value, cause);
                        Claim::Inserted
                    }
                    // Installed by another thread after our read.
                    Freshness::Fresh | Freshness::Refreshable => {
                        entry.touch(now);
                        Claim::Found(entry.value.clone())
                    }
                }
            }
            None => {
                shard.insert(hash, Arc::clone(key), Slot::Loading(TrioArc::clone(waiter)));
                Claim::Inserted
            }
        }
    }

    fn complete_load(
        &self,
        hash: u64,
        key: &Arc<K>,
        waiter: &Waiter<V>,
        started: Option<Instant>,
        result: Result<&V, &LoadError>,
    ) {
        self.record_load(started, result.is_ok());

        let mut removed = RemovedEntries::new();
        {
            let mut shard = self.table.segment(hash).write();
            let is_ours = matches!(
                shard.find(hash, &**key),
                Some((_, Slot::Loading(w))) if TrioArc::ptr_eq(w, waiter)
            );
            match result {
                Ok(value) if is_ours => {
                    let entry =
                        ValueEntry::new(value.clone(), self.clock.now(), self.table.generation());
                    shard.insert(hash, Arc::clone(key), Slot::Ready(entry));
                    self.evict_lru(&mut shard, hash, key, &mut removed);
                }
                // A `put` replaced the placeholder while we were loading.
                Ok(value) => self.push_removal(&mut removed, key, value, RemovalCause::Replaced),
                Err(_) if is_ours => {
                    shard.remove_if(hash, &**key, |_| true);
                }
                Err(_) => (),
            }
        }
        self.notify(removed);
    }

    /// Runs `reload` for `entry`, whose refresh claim must be held by the caller,
    /// and installs the result. Returns `None` if the reload failed.
    fn reload_and_install(
        &self,
        key: &Arc<K>,
        hash: u64,
        entry: &TrioArc<ValueEntry<V>>,
        reload: impl FnOnce(&K, &V) -> Result<V, BoxError>,
    ) -> Option<V> {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let started = self.load_started();
        let result = match catch_unwind(AssertUnwindSafe(|| reload(&**key, &entry.value))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(LoadError::from_boxed(e)),
            Err(_payload) => Err(LoadError::Panicked),
        };
        self.record_load(started, result.is_ok());

        match result {
            Ok(value) => {
                self.install_reloaded(key, hash, entry, &value);
                entry.release_refresh();
                Some(value)
            }
            Err(err) => {
                entry.release_refresh();
                self.on_reload_failure(key, &err);
                None
            }
        }
    }

    fn install_reloaded(
        &self,
        key: &Arc<K>,
        hash: u64,
        original: &TrioArc<ValueEntry<V>>,
        value: &V,
    ) {
        let mut removed = RemovedEntries::new();
        {
            let mut shard = self.table.segment(hash).write();
            let now = self.clock.now();
            let current_gen = self.table.generation();

            let (install, displaced) = match shard.find(hash, &**key).map(|(_, s)| s.clone()) {
                None => (true, None),
                Some(Slot::Ready(current)) if TrioArc::ptr_eq(&current, original) => {
                    let cause = if current.generation() == current_gen {
                        RemovalCause::Replaced
                    } else {
                        RemovalCause::Explicit
                    };
                    (true, Some((current, cause)))
                }
                Some(Slot::Ready(current)) => {
                    match self.expiration.classify(&current, now, current_gen) {
                        Freshness::Stale(cause) => (true, Some((current, cause))),
                        // A newer value was written while we were reloading.
                        Freshness::Fresh | Freshness::Refreshable => (false, None),
                    }
                }
                // A load started after the entry was invalidated. The reloaded
                // value takes its place; the load reports its own value as
                // replaced when it completes.
                Some(Slot::Loading(_)) => (true, None),
            };

            if install {
                let entry = ValueEntry::new(value.clone(), now, current_gen);
                shard.insert(hash, Arc::clone(key), Slot::Ready(entry));
                if let Some((old, cause)) = displaced {
                    self.push_removal(&mut removed, key, &old.value, cause);
                }
                self.evict_lru(&mut shard, hash, key, &mut removed);
            } else {
                self.push_removal(&mut removed, key, value, RemovalCause::Replaced);
            }
        }
        self.notify(removed);
    }

    /// Writes `value` for `key`, returning the value it replaced if that value
    /// was visible.
    pub(crate) fn put(&self, key: K, value: V) -> Option<V> {
        let hash = self.table.hash(&key);
        let key = Arc::new(key);
        let mut removed = RemovedEntries::new();

        let previous = {
            let mut shard = self.table.segment(hash).write();
            let now = self.clock.now();
            let current_gen = self.table.generation();
            let entry = ValueEntry::new(value, now, current_gen);

            let previous = match shard.insert(hash, Arc::clone(&key), Slot::Ready(entry)) {
                Some(Slot::Ready(old)) => match self.expiration.classify(&old, now, current_gen) {
                    Freshness::Stale(cause) => {
                        self.push_removal(&mut removed, &key, &old.value, cause);
                        None
                    }
                    Freshness::Fresh | Freshness::Refreshable => {
                        self.push_removal(&mut removed, &key, &old.value, RemovalCause::Replaced);
                        Some(old.value.clone())
                    }
                },
                // The load in flight will find its placeholder gone.
                Some(Slot::Loading(_)) | None => None,
            };
            self.evict_lru(&mut shard, hash, &key, &mut removed);
            previous
        };

        self.notify(removed);
        previous
    }

    /// Removes the value of `key`, returning it if it was visible. A load in
    /// flight for the key is not affected.
    pub(crate) fn invalidate<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.table.hash(key);
        let mut removed = RemovedEntries::new();

        let value = {
            let mut shard = self.table.segment(hash).write();
            let (k, slot) = shard.remove_if(hash, key, |slot| slot.as_ready().is_some())?;
            let Slot::Ready(entry) = slot else {
                return None;
            };
            let now = self.clock.now();
            match self
                .expiration
                .classify(&entry, now, self.table.generation())
            {
                Freshness::Stale(cause) => {
                    self.push_removal(&mut removed, &k, &entry.value, cause);
                    None
                }
                Freshness::Fresh | Freshness::Refreshable => {
                    self.push_removal(&mut removed, &k, &entry.value, RemovalCause::Explicit);
                    Some(entry.value.clone())
                }
            }
        };

        self.notify(removed);
        value
    }

    pub(crate) fn invalidate_all(&self) {
        let mut removed = Vec::new();
        for (key, entry) in self.table.clear() {
            self.push_removal(&mut removed, &key, &entry.value, RemovalCause::Explicit);
        }
        self.notify(removed);
    }

    /// Removes expired and invalidated entries.
    pub(crate) fn clean_up(&self) {
        let now = self.clock.now();
        let current_gen = self.table.generation();

        for segment in self.table.segments() {
            let mut drained = Vec::new();
            segment.write().sweep(
                |entry| {
                    matches!(
                        self.expiration.classify(entry, now, current_gen),
                        Freshness::Stale(_)
                    )
                },
                &mut drained,
            );
            if drained.is_empty() {
                continue;
            }

            let mut removed = Vec::with_capacity(drained.len());
            for (key, entry) in drained {
                let cause = if entry.generation() == current_gen {
                    RemovalCause::Expired
                } else {
                    RemovalCause::Explicit
                };
                self.push_removal(&mut removed, &key, &entry.value, cause);
            }
            self.notify(removed);
        }
    }

    /// Evicts the least recently accessed entries of the shard while it is over
    /// capacity. The entry of `key` was just written and is evicted only if it
    /// is the sole entry.
    fn evict_lru(
        &self,
        shard: &mut Shard<K, V>,
        hash: u64,
        key: &Arc<K>,
        removed: &mut impl Extend<RemovedEntry<K, V>>,
    ) {
        let Some(capacity) = self.table.segment_capacity() else {
            return;
        };
        while shard.num_ready() > capacity {
            let (victim_hash, victim) = shard
                .lru_victim(key)
                .unwrap_or_else(|| (hash, Arc::clone(key)));
            match shard.remove_if(victim_hash, &*victim, |slot| slot.as_ready().is_some()) {
                Some((k, Slot::Ready(entry))) => {
                    self.push_removal(&mut *removed, &k, &entry.value, RemovalCause::Size)
                }
                _ => break,
            }
        }
    }

    fn on_reload_failure(&self, key: &K, error: &LoadError) {
        #[cfg(feature = "logging")]
        log::warn!(
            "{}Failed to refresh a cached value: {error}",
            self.name
                .as_deref()
                .map(|name| format!("[{name}] "))
                .unwrap_or_default()
        );

        if let Some(listener) = &self.reload_failure_listener {
            listener(key, error);
        }
    }

    fn push_removal(
        &self,
        removed: &mut impl Extend<RemovedEntry<K, V>>,
        key: &Arc<K>,
        value: &V,
        cause: RemovalCause,
    ) {
        self.stats.record_removal(cause);
        if self.removal_notifier.is_some() {
            removed.extend(Some(RemovedEntry::new(Arc::clone(key), value.clone(), cause)));
        }
    }

    fn load_started(&self) -> Option<Instant> {
        self.is_recording_stats.then(|| self.clock.now())
    }

    fn record_load(&self, started: Option<Instant>, is_success: bool) {
        let Some(started) = started else {
            return;
        };
        let elapsed = self.clock.now().as_nanos().saturating_sub(started.as_nanos());
        if is_success {
            self.stats.record_load_success(elapsed);
        } else {
            self.stats.record_load_failure(elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effective_num_segments;

    #[test]
    fn segments_are_reduced_for_small_capacities() {
        assert_eq!(effective_num_segments(16, None), 16);
        assert_eq!(effective_num_segments(10, None), 16);
        assert_eq!(effective_num_segments(0, None), 1);
        assert_eq!(effective_num_segments(16, Some(320)), 16);
        assert_eq!(effective_num_segments(16, Some(100)), 4);
        assert_eq!(effective_num_segments(16, Some(19)), 1);
        assert_eq!(effective_num_segments(16, Some(0)), 1);
    }
}
