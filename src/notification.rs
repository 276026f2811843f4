//! Common data types for notifications.

pub(crate) mod notifier;

use std::sync::Arc;

pub(crate) type RemovalListener<K, V> =
    Arc<dyn Fn(Arc<K>, V, RemovalCause) + Send + Sync + 'static>;

/// Configuration for a removal listener of a cache.
///
/// Currently only setting the [`DeliveryMode`][delivery-mode] is supported.
///
/// [delivery-mode]: ./enum.DeliveryMode.html
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    mode: DeliveryMode,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.mode
    }
}

/// Builds a [`Configuration`][conf] with some configuration knobs.
///
/// [conf]: ./struct.Configuration.html
#[derive(Default)]
pub struct ConfigurationBuilder {
    mode: DeliveryMode,
}

impl ConfigurationBuilder {
    pub fn build(self) -> Configuration {
        Configuration { mode: self.mode }
    }

    pub fn delivery_mode(self, mode: DeliveryMode) -> Self {
        Self { mode }
    }
}

/// Specifies how and when removal notifications should be delivered to a
/// removal listener.
///
/// In both modes a notification is sent only after the removal is visible to
/// other threads, and never while the cache holds an internal lock, so the
/// listener may call back into the cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// The listener is called on the thread that removed the entry, right
    /// before the cache operation returns. Notifications for a given key are
    /// delivered in the order of the removals, but a slow listener slows down
    /// the cache operation that triggered it.
    Immediate,
    /// Notifications are put in a queue and delivered by a background worker
    /// thread some time after the removal. The cache operation does not wait for
    /// the listener. This is the default.
    ///
    /// Notifications still queued when the last clone of the cache is dropped
    /// are delivered by the thread that drops it.
    #[default]
    Queued,
}

/// Indicates the reason why a cached entry was removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalCause {
    /// The entry's expiration timestamp has passed.
    Expired,
    /// The entry was manually removed by the user, by `invalidate` or
    /// `invalidate_all`.
    Explicit,
    /// The entry itself was not actually removed, but its value was replaced by
    /// the user or by a reload. Also used for a computed value that was discarded
    /// because a newer value had been written while it was computed.
    Replaced,
    /// The entry was evicted due to size constraints.
    Size,
    /// The value was reclaimed by a memory manager. Entries in this cache are
    /// owned by the cache, so this cause is never produced; it exists so that
    /// listeners written against the general removal contract stay exhaustive.
    Collected,
}

impl RemovalCause {
    /// Returns `true` if the removal was made by the cache itself rather than by
    /// the user.
    pub fn was_evicted(&self) -> bool {
        matches!(self, Self::Expired | Self::Size | Self::Collected)
    }
}

#[cfg(test)]
mod tests {
    use super::{Configuration, DeliveryMode, RemovalCause};

    #[test]
    fn default_delivery_mode_is_queued() {
        assert_eq!(Configuration::default().delivery_mode(), DeliveryMode::Queued);

        let conf = Configuration::builder()
            .delivery_mode(DeliveryMode::Immediate)
            .build();
        assert_eq!(conf.delivery_mode(), DeliveryMode::Immediate);
    }

    #[test]
    fn eviction_causes() {
        assert!(RemovalCause::Expired.was_evicted());
        assert!(RemovalCause::Size.was_evicted());
        assert!(!RemovalCause::Explicit.was_evicted());
        assert!(!RemovalCause::Replaced.was_evicted());
    }
}
