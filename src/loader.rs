use std::{fmt, marker::PhantomData};

use crate::common::error::BoxError;

/// Computes values for a [`LoadingCache`][loading-cache].
///
/// `load` is called when a key has no usable value in the cache. `reload` is
/// called when a cached value became refreshable (see
/// [`CacheBuilder::refresh_after_write`][refresh]); it receives the value
/// currently cached so it can derive the new value from it. The default `reload`
/// simply calls `load`.
///
/// Both methods may block and may fail. A failed `load` is returned to every
/// caller waiting for the key. A failed `reload` is never returned to a caller:
/// the stale value stays in the cache until it expires.
///
/// # Example
///
/// ```rust
/// use loading_cache::{BoxError, CacheLoader};
///
/// struct Doubler;
///
/// impl CacheLoader<u32, u64> for Doubler {
///     fn load(&self, key: &u32) -> Result<u64, BoxError> {
///         Ok(u64::from(*key) * 2)
///     }
/// }
/// ```
///
/// [loading-cache]: ./sync/struct.LoadingCache.html
/// [refresh]: ./sync/struct.CacheBuilder.html#method.refresh_after_write
pub trait CacheLoader<K, V>: Send + Sync + 'static {
    /// Computes the value for `key`.
    fn load(&self, key: &K) -> Result<V, BoxError>;

    /// Computes a replacement for `old_value`, the value currently cached for
    /// `key`.
    fn reload(&self, key: &K, old_value: &V) -> Result<V, BoxError> {
        let _ = old_value;
        self.load(key)
    }
}

/// Creates a [`CacheLoader`] from a closure. The closure is used for both loads
/// and reloads.
///
/// # Example
///
/// ```rust
/// use loading_cache::{loader, sync::LoadingCache};
///
/// let cache = LoadingCache::builder()
///     .build(loader::from_fn(|key: &String| -> Result<usize, std::io::Error> {
///         Ok(key.len())
///     }));
///
/// assert_eq!(cache.get("hello").unwrap(), 5);
/// ```
pub fn from_fn<K, V, E, F>(f: F) -> FnLoader<F, E>
where
    F: Fn(&K) -> Result<V, E>,
{
    FnLoader {
        f,
        _marker: PhantomData,
    }
}

/// A [`CacheLoader`] created by [`from_fn`].
pub struct FnLoader<F, E> {
    f: F,
    _marker: PhantomData<fn() -> E>,
}

impl<F, E> fmt::Debug for FnLoader<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLoader").finish()
    }
}

impl<K, V, E, F> CacheLoader<K, V> for FnLoader<F, E>
where
    F: Fn(&K) -> Result<V, E> + Send + Sync + 'static,
    E: Into<BoxError> + 'static,
{
    fn load(&self, key: &K) -> Result<V, BoxError> {
        (self.f)(key).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::{from_fn, CacheLoader};
    use crate::BoxError;

    struct Incrementing;

    impl CacheLoader<i32, i32> for Incrementing {
        fn load(&self, key: &i32) -> Result<i32, BoxError> {
            Ok(*key)
        }

        fn reload(&self, _key: &i32, old_value: &i32) -> Result<i32, BoxError> {
            Ok(old_value + 1)
        }
    }

    #[test]
    fn default_reload_calls_load() {
        let loader = from_fn(|key: &i32| -> Result<i32, std::io::Error> { Ok(key * 10) });
        assert_eq!(loader.load(&2).unwrap(), 20);
        assert_eq!(loader.reload(&2, &7).unwrap(), 20);
    }

    #[test]
    fn custom_reload_sees_old_value() {
        let loader = Incrementing;
        assert_eq!(loader.load(&3).unwrap(), 3);
        assert_eq!(loader.reload(&3, &3).unwrap(), 4);
    }

    #[test]
    fn closure_errors_are_boxed() {
        let loader = from_fn(|_key: &i32| -> Result<i32, std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        });
        let err = loader.load(&1).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
