use super::value_initializer::Waiter;
use crate::common::{concurrent::ValueEntry, time::Instant};

use parking_lot::RwLock;
use smallvec::SmallVec;
use std::{
    borrow::Borrow,
    collections::HashMap,
    hash::{BuildHasher, BuildHasherDefault, Hash, Hasher},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use triomphe::Arc as TrioArc;

/// The state of a key in the table. A key without a slot is absent.
pub(crate) enum Slot<V> {
    /// A load is in flight. Other readers wait on the waiter instead of starting
    /// their own load.
    Loading(Waiter<V>),
    Ready(TrioArc<ValueEntry<V>>),
}

impl<V> Clone for Slot<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading(w) => Self::Loading(TrioArc::clone(w)),
            Self::Ready(e) => Self::Ready(TrioArc::clone(e)),
        }
    }
}

impl<V> Slot<V> {
    pub(crate) fn as_ready(&self) -> Option<&TrioArc<ValueEntry<V>>> {
        match self {
            Self::Ready(entry) => Some(entry),
            Self::Loading(_) => None,
        }
    }

    fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Keys whose hashes are equal share a bucket.
type Bucket<K, V> = SmallVec<[(Arc<K>, Slot<V>); 1]>;

/// The hash map of one segment. It is keyed by the full 64-bit hash of the key,
/// which lets lookups use any borrowed form of the key.
pub(crate) struct Shard<K, V> {
    buckets: HashMap<u64, Bucket<K, V>, BuildHasherDefault<PassThroughHasher>>,
    num_ready: usize,
}

impl<K, V> Shard<K, V>
where
    K: Eq,
{
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: HashMap::with_capacity_and_hasher(capacity, Default::default()),
            num_ready: 0,
        }
    }

    pub(crate) fn find<Q>(&self, hash: u64, key: &Q) -> Option<(&Arc<K>, &Slot<V>)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.buckets
            .get(&hash)?
            .iter()
            .find(|(k, _)| equivalent(k, key))
            .map(|(k, s)| (k, s))
    }

    /// Stores `slot` for `key`, returning the slot it replaced. When the key is
    /// already present, the stored `Arc<K>` is kept.
    pub(crate) fn insert(&mut self, hash: u64, key: Arc<K>, slot: Slot<V>) -> Option<Slot<V>> {
        if slot.is_ready() {
            self.num_ready += 1;
        }
        let bucket = self.buckets.entry(hash).or_default();
        let old = match bucket.iter_mut().find(|(k, _)| **k == *key) {
            Some((_, s)) => Some(std::mem::replace(s, slot)),
            None => {
                bucket.push((key, slot));
                None
            }
        };
        if matches!(&old, Some(s) if s.is_ready()) {
            self.num_ready -= 1;
        }
        old
    }

    /// Removes the slot of `key` if `condition` returns `true` for it.
    pub(crate) fn remove_if<Q>(
        &mut self,
        hash: u64,
        key: &Q,
        condition: impl FnOnce(&Slot<V>) -> bool,
    ) -> Option<(Arc<K>, Slot<V>)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let bucket = self.buckets.get_mut(&hash)?;
        let index = bucket.iter().position(|(k, _)| equivalent(k, key))?;
        if !condition(&bucket[index].1) {
            return None;
        }
        let removed = bucket.swap_remove(index);
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        if removed.1.is_ready() {
            self.num_ready -= 1;
        }
        Some(removed)
    }

    /// Removes every `Ready` entry for which `predicate` returns `true` and
    /// pushes it to `removed`. `Loading` slots are kept.
    pub(crate) fn sweep(
        &mut self,
        mut predicate: impl FnMut(&ValueEntry<V>) -> bool,
        removed: &mut Vec<(Arc<K>, TrioArc<ValueEntry<V>>)>,
    ) {
        let mut num_removed = 0;
        self.buckets.retain(|_hash, bucket| {
            let mut i = 0;
            while i < bucket.len() {
                if !matches!(&bucket[i].1, Slot::Ready(entry) if predicate(entry)) {
                    i += 1;
                    continue;
                }
                let (key, slot) = bucket.swap_remove(i);
                if let Slot::Ready(entry) = slot {
                    removed.push((key, entry));
                }
                num_removed += 1;
            }
            !bucket.is_empty()
        });
        self.num_ready -= num_removed;
    }

    /// Returns the least recently accessed `Ready` entry other than `excluded`.
    pub(crate) fn lru_victim(&self, excluded: &Arc<K>) -> Option<(u64, Arc<K>)> {
        let mut victim: Option<(Instant, u64, &Arc<K>)> = None;
        for (hash, bucket) in &self.buckets {
            for (key, slot) in bucket {
                let Slot::Ready(entry) = slot else { continue };
                if Arc::ptr_eq(key, excluded) || **key == **excluded {
                    continue;
                }
                let accessed = entry.last_accessed();
                if victim.map_or(true, |(t, _, _)| accessed < t) {
                    victim = Some((accessed, *hash, key));
                }
            }
        }
        victim.map(|(_, hash, key)| (hash, Arc::clone(key)))
    }

    pub(crate) fn num_ready(&self) -> usize {
        self.num_ready
    }
}

#[inline]
fn equivalent<K, Q>(stored: &Arc<K>, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    key == (**stored).borrow()
}

/// A sharded table of slots. Each shard is guarded by its own lock, so
/// operations on keys in different shards never block each other.
pub(crate) struct EntryTable<K, V, S> {
    segments: Box<[RwLock<Shard<K, V>>]>,
    build_hasher: S,
    segment_shift: u32,
    segment_capacity: Option<usize>,
    generation: AtomicU64,
}

impl<K, V, S> EntryTable<K, V, S> {
    pub(crate) fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn segment_capacity(&self) -> Option<usize> {
        self.segment_capacity
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl<K, V, S> EntryTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// # Panics
    ///
    /// Panics if `num_segments` is 0.
    pub(crate) fn new(
        num_segments: usize,
        initial_capacity: Option<usize>,
        segment_capacity: Option<usize>,
        build_hasher: S,
    ) -> Self {
        assert!(num_segments > 0);

        let actual_num_segments = num_segments.next_power_of_two();
        let segment_shift = 64 - actual_num_segments.trailing_zeros();
        let seg_initial_capacity = initial_capacity
            .map(|cap| (cap + actual_num_segments - 1) / actual_num_segments)
            .unwrap_or_default();
        let segments = (0..actual_num_segments)
            .map(|_| RwLock::new(Shard::with_capacity(seg_initial_capacity)))
            .collect::<Vec<_>>();

        Self {
            segments: segments.into_boxed_slice(),
            build_hasher,
            segment_shift,
            segment_capacity,
            generation: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn hash<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut hasher = self.build_hasher.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[inline]
    pub(crate) fn segment(&self, hash: u64) -> &RwLock<Shard<K, V>> {
        let index = self.segment_index_from_hash(hash);
        &self.segments[index]
    }

    #[inline]
    fn segment_index_from_hash(&self, hash: u64) -> usize {
        if self.segment_shift == 64 {
            0
        } else {
            (hash >> self.segment_shift) as usize
        }
    }

    pub(crate) fn segments(&self) -> impl Iterator<Item = &RwLock<Shard<K, V>>> {
        self.segments.iter()
    }

    /// Makes every `Ready` entry installed so far invisible, then removes those
    /// entries segment by segment and returns them. Entries installed after the
    /// generation was bumped, and `Loading` slots, are kept.
    pub(crate) fn clear(&self) -> Vec<(Arc<K>, TrioArc<ValueEntry<V>>)> {
        let new_gen = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let mut removed = Vec::new();
        for segment in self.segments() {
            segment
                .write()
                .sweep(|entry| entry.generation() < new_gen, &mut removed);
        }
        removed
    }

    /// Returns the number of `Ready` entries, including ones that are expired
    /// but not yet removed.
    pub(crate) fn entry_count(&self) -> u64 {
        self.segments()
            .map(|segment| segment.read().num_ready() as u64)
            .sum()
    }
}

/// A hasher for keys that are already 64-bit hashes.
///
/// The hash is rotated so that the bits used to select a segment, which are the
/// same for every key in a segment, do not end up in the bits the hash map uses
/// for probing.
#[derive(Default)]
pub(crate) struct PassThroughHasher(u64);

impl Hasher for PassThroughHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(*byte);
        }
    }

    fn write_u64(&mut self, hash: u64) {
        self.0 = hash.rotate_left(32);
    }
}
