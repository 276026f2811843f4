use std::time::Duration;

use crate::{
    common::{concurrent::ValueEntry, time::Instant},
    notification::RemovalCause,
};

#[derive(Clone, Debug)]
/// The policy of a cache.
pub struct Policy {
    max_capacity: Option<u64>,
    num_segments: usize,
    expiration: ExpirationPolicy,
}

impl Policy {
    pub(crate) fn new(
        max_capacity: Option<u64>,
        num_segments: usize,
        expiration: ExpirationPolicy,
    ) -> Self {
        Self {
            max_capacity,
            num_segments,
            expiration,
        }
    }

    /// Returns the `max_capacity` of the cache.
    pub fn max_capacity(&self) -> Option<u64> {
        self.max_capacity
    }

    /// Returns the number of internal segments of the cache.
    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    /// Returns the `refresh_after_write` of the cache.
    pub fn refresh_after_write(&self) -> Option<Duration> {
        self.expiration.refresh_after_write
    }

    /// Returns the `expire_after_write` of the cache.
    pub fn expire_after_write(&self) -> Option<Duration> {
        self.expiration.expire_after_write
    }

    /// Returns the `expire_after_access` of the cache.
    pub fn expire_after_access(&self) -> Option<Duration> {
        self.expiration.expire_after_access
    }
}

/// What a cache read should do with an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Freshness {
    /// Return the value.
    Fresh,
    /// Return the value and reload it.
    Refreshable,
    /// Treat the key as absent. The entry is removed with the given cause.
    Stale(RemovalCause),
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ExpirationPolicy {
    refresh_after_write: Option<Duration>,
    expire_after_write: Option<Duration>,
    expire_after_access: Option<Duration>,
}

impl ExpirationPolicy {
    pub(crate) fn new(
        refresh_after_write: Option<Duration>,
        expire_after_write: Option<Duration>,
        expire_after_access: Option<Duration>,
    ) -> Self {
        Self {
            refresh_after_write,
            expire_after_write,
            expire_after_access,
        }
    }

    #[cfg(test)]
    pub(crate) fn refreshes(&self) -> bool {
        self.refresh_after_write.is_some()
    }

    #[cfg(test)]
    pub(crate) fn expires(&self) -> bool {
        self.expire_after_write.is_some() || self.expire_after_access.is_some()
    }

    /// Classifies `entry` at time `now`.
    ///
    /// An entry from an older generation was logically removed by
    /// `invalidate_all`. Expiration is checked before refresh, so an entry whose
    /// age equals `expire_after_write` is expired, never refreshable. An entry
    /// becomes refreshable only once its age is strictly greater than
    /// `refresh_after_write`.
    pub(crate) fn classify<V>(
        &self,
        entry: &ValueEntry<V>,
        now: Instant,
        current_generation: u64,
    ) -> Freshness {
        if entry.generation() != current_generation {
            return Freshness::Stale(RemovalCause::Explicit);
        }
        if self.is_expired(entry, now) {
            return Freshness::Stale(RemovalCause::Expired);
        }
        if let Some(refresh) = self.refresh_after_write {
            if now.saturating_duration_since(entry.write_time()) > refresh {
                return Freshness::Refreshable;
            }
        }
        Freshness::Fresh
    }

    pub(crate) fn is_expired<V>(&self, entry: &ValueEntry<V>, now: Instant) -> bool {
        if let Some(ttl) = self.expire_after_write {
            if now.saturating_duration_since(entry.write_time()) >= ttl {
                return true;
            }
        }
        if let Some(tti) = self.expire_after_access {
            if now.saturating_duration_since(entry.last_accessed()) >= tti {
                return true;
            }
        }
        false
    }
}
