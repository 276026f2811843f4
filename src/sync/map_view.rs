use super::base_cache::BaseCache;

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
};

/// A view of a [`LoadingCache`][loading-cache] as a concurrent map, returned by
/// [`LoadingCache::as_map`][as-map].
///
/// Reads and writes through the view act on the cache directly, so they observe
/// and affect the same entries, removal listener and statistics. The view never
/// runs the loader and never reloads a value.
///
/// [loading-cache]: ./struct.LoadingCache.html
/// [as-map]: ./struct.LoadingCache.html#method.as_map
pub struct CacheMap<K, V, S = RandomState> {
    base: BaseCache<K, V, S>,
}

impl<K, V, S> Clone for CacheMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
        }
    }
}

impl<K, V, S> CacheMap<K, V, S>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(base: BaseCache<K, V, S>) -> Self {
        Self { base }
    }

    /// Returns a _clone_ of the value of the key if it is cached and not expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.base.inner.get_if_present(key)
    }

    /// Inserts the value and returns the value it replaced, if any.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.base.inner.put(key, value)
    }

    /// Removes the value of the key and returns it, if any.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.base.inner.invalidate(key)
    }

    /// Returns `true` if the key has a value that is not expired. Unlike `get`,
    /// this does not count as an access to the value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.base.inner.contains_key(key)
    }

    /// Returns the approximate number of entries. See
    /// [`LoadingCache::size`](./struct.LoadingCache.html#method.size).
    pub fn len(&self) -> usize {
        usize::try_from(self.base.inner.entry_count()).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all values. Same as `LoadingCache::invalidate_all`.
    pub fn clear(&self) {
        self.base.inner.invalidate_all();
    }
}
