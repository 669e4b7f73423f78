//! Probabilistic ordered map over a fixed-capacity slot arena.
//!
//! Nodes carry a variable-length array of forward handles; a node drawn at
//! level `ℓ` is linked into the chains for levels `0..ℓ`. The head sentinel
//! occupies slot 0, owns `max_level` forward handles and never holds an
//! entry.
//!
//! ## Architecture
//!
//! ```text
//!   level 2:  HEAD ─────────────────────────► [5] ──────────────────────► NIL
//!   level 1:  HEAD ─────────► [2] ──────────► [5] ──────────► [8] ──────► NIL
//!   level 0:  HEAD ─► [1] ──► [2] ──► [3] ──► [5] ──► [7] ──► [8] ──────► NIL
//!
//!   search(6), top-down:
//!     level 2: HEAD → 5            (next is NIL)      update[2] = 5
//!     level 1: 5                   (next 8 ≥ 6)       update[1] = 5
//!     level 0: 5                   (next 7 ≥ 6)       update[0] = 5
//!
//!   update[i] is the rightmost node at level i whose key is < 6
//! ```
//!
//! ## Leveling
//!
//! Levels come from repeated Bernoulli(`p`) trials on an injected random
//! source, starting at 1 and capped at `max_level`:
//! `P(level = k) = p^(k-1)·(1-p)` for `k < max_level`, with the remaining
//! mass at `max_level`. Pass a seeded [`SmallRng`] through
//! [`SkipList::with_rng`] for reproducible shapes.
//!
//! ## Duplicate keys
//!
//! Inserting a key that is already present replaces its value in place.
//! No level is drawn and no slot is allocated, so an update succeeds even
//! when the arena is full.
//!
//! ## Example
//!
//! ```
//! use arenakit::ds::skip_list::SkipList;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut list = SkipList::with_rng(3, 0.5, 16, SmallRng::seed_from_u64(7)).unwrap();
//! list.insert(5, 500).unwrap();
//! list.insert(2, 200).unwrap();
//! list.insert(8, 800).unwrap();
//!
//! assert_eq!(list.get(&2), Some(&200));
//! assert!(list.remove(&5));
//! assert_eq!(list.get(&5), None);
//! assert_eq!(list.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![2, 8]);
//! ```

use std::fmt;
use std::mem;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{CapacityError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SkipListMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SkipListMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, SkipListMetricsReadRecorder, SkipListMetricsRecorder,
};
use crate::traits::OrderedMap;

/// Highest supported `max_level`.
pub const MAX_LEVEL_LIMIT: usize = 32;

const HEAD: SlotId = SlotId::new(0);

#[derive(Debug)]
struct Node<K, V> {
    entry: Option<(K, V)>,
    forwards: Vec<SlotId>,
}

/// Ordered map with expected O(log n) search, insert and remove.
///
/// Holds at most `capacity` entries; a new key beyond that is rejected with
/// [`CapacityError`].
pub struct SkipList<K, V, R = SmallRng> {
    arena: SlotArena<Node<K, V>>,
    max_level: usize,
    probability: f64,
    rng: R,
    #[cfg(feature = "metrics")]
    metrics: SkipListMetrics,
}

impl<K: Ord, V> SkipList<K, V, SmallRng> {
    /// Creates a skip list whose levels come from an OS-seeded [`SmallRng`].
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `max_level` is 0 or above [`MAX_LEVEL_LIMIT`], or
    /// `probability` is not strictly between 0 and 1.
    pub fn new(max_level: usize, probability: f64, capacity: usize) -> Result<Self, ConfigError> {
        Self::with_rng(max_level, probability, capacity, SmallRng::from_os_rng())
    }
}

impl<K: Ord, V, R: Rng> SkipList<K, V, R> {
    /// Creates a skip list drawing levels from `rng`.
    pub fn with_rng(
        max_level: usize,
        probability: f64,
        capacity: usize,
        rng: R,
    ) -> Result<Self, ConfigError> {
        if max_level == 0 {
            return Err(ConfigError::new("max_level must be at least 1"));
        }
        if max_level > MAX_LEVEL_LIMIT {
            return Err(ConfigError::new(format!(
                "max_level {max_level} exceeds limit {MAX_LEVEL_LIMIT}"
            )));
        }
        if !(probability > 0.0 && probability < 1.0) {
            return Err(ConfigError::new(format!(
                "probability must be in (0, 1), got {probability}"
            )));
        }

        let head = Node {
            entry: None,
            forwards: vec![SlotId::NIL; max_level],
        };
        debug!(max_level, probability, capacity, "created skip list");
        Ok(Self {
            arena: SlotArena::with_sentinels(capacity, vec![head]),
            max_level,
            probability,
            rng,
            #[cfg(feature = "metrics")]
            metrics: SkipListMetrics::with_max_level(max_level),
        })
    }

    /// Inserts `key`, or replaces its value if it is already present.
    ///
    /// Returns the previous value on update.
    ///
    /// # Errors
    ///
    /// [`CapacityError`] when `key` is new and every slot is live. The list
    /// is left untouched and no level is drawn.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError> {
        let mut update = [HEAD; MAX_LEVEL_LIMIT];
        let pred = self.descend(&key, |level, id| update[level] = id);

        if let Some(next) = self.forward(pred, 0)
            && let Some((existing, slot)) = self.arena.get_mut(next).and_then(|n| n.entry.as_mut())
            && *existing == key
        {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return Ok(Some(mem::replace(slot, value)));
        }

        if self.arena.free_len() == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            let err = CapacityError::new(self.arena.capacity());
            warn!(%err, "skip list insert rejected");
            return Err(err);
        }

        let level = self.random_level();
        let forwards = (0..level).map(|i| self.link(update[i], i)).collect();
        let id = self.arena.allocate(Node {
            entry: Some((key, value)),
            forwards,
        })?;
        for (i, &pred) in update.iter().enumerate().take(level) {
            self.set_link(pred, i, id);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new(level);

        Ok(None)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let found = self.find(key).and_then(|id| self.value_at(id));

        #[cfg(feature = "metrics")]
        {
            if found.is_some() {
                (&self.metrics).record_get_hit();
            } else {
                (&self.metrics).record_get_miss();
            }
        }

        found
    }

    /// Returns a mutable reference to the value under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find(key)?;
        self.arena
            .get_mut(id)?
            .entry
            .as_mut()
            .map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`; returns `false` if it was absent.
    pub fn remove(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes `key` and returns the stored pair.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let mut update = [HEAD; MAX_LEVEL_LIMIT];
        let pred = self.descend(key, |level, id| update[level] = id);
        let target = self.forward(pred, 0)?;
        if self.key_at(target) != Some(key) {
            return None;
        }

        let height = self.arena.get(target).map_or(0, |node| node.forwards.len());
        for (level, &pred) in update.iter().enumerate().take(height) {
            if self.link(pred, level) != target {
                break;
            }
            let next = self.link(target, level);
            self.set_link(pred, level, next);
        }

        let entry = self.arena.release(target)?.entry;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        entry
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.forward(HEAD, 0).and_then(|id| self.entry_at(id))
    }

    /// Entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut current = HEAD;
        for level in (0..self.max_level).rev() {
            while let Some(next) = self.forward(current, level) {
                current = next;
            }
        }
        self.entry_at(current)
    }

    /// In-order iterator over all entries.
    pub fn iter(&self) -> Iter<'_, K, V, R> {
        Iter {
            list: self,
            current: self.link(HEAD, 0),
        }
    }

    /// In-order iterator over entries whose key is `>= start`.
    pub fn range_from(&self, start: &K) -> Iter<'_, K, V, R> {
        let pred = self.descend(start, |_, _| {});
        Iter {
            list: self,
            current: self.link(pred, 0),
        }
    }

    /// Number of nodes linked at each level, bottom level first.
    pub fn level_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.max_level];
        for (_, node) in self.arena.iter() {
            for count in counts.iter_mut().take(node.forwards.len()) {
                *count += 1;
            }
        }
        counts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    #[inline]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Releases every node and resets the head to an empty tower.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.arena.clear();
        if let Some(head) = self.arena.get_mut(HEAD) {
            head.forwards.fill(SlotId::NIL);
        }
    }

    /// Walks every level and the arena, reporting the first broken
    /// invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let head = self
            .arena
            .get(HEAD)
            .ok_or_else(|| InvariantError::new("head sentinel missing"))?;
        if head.forwards.len() != self.max_level {
            return Err(InvariantError::new(format!(
                "head has {} forwards, expected {}",
                head.forwards.len(),
                self.max_level
            )));
        }
        if head.entry.is_some() {
            return Err(InvariantError::new("head sentinel holds an entry"));
        }

        let expected = self.level_counts();
        for level in 0..self.max_level {
            let mut current = self.link(HEAD, level);
            let mut prev_key: Option<&K> = None;
            let mut count = 0usize;
            while !current.is_nil() {
                count += 1;
                if count > self.len() {
                    return Err(InvariantError::new(format!(
                        "level {level} chain is longer than len; cycle suspected"
                    )));
                }
                if !self.arena.contains(current) {
                    return Err(InvariantError::new(format!(
                        "level {level} references dead slot {}",
                        current.index()
                    )));
                }
                let node = self.arena.get(current).ok_or_else(|| {
                    InvariantError::new(format!("slot {} vanished", current.index()))
                })?;
                if node.forwards.len() <= level {
                    return Err(InvariantError::new(format!(
                        "slot {} of height {} linked at level {level}",
                        current.index(),
                        node.forwards.len()
                    )));
                }
                let (key, _) = node.entry.as_ref().ok_or_else(|| {
                    InvariantError::new(format!("slot {} has no entry", current.index()))
                })?;
                if prev_key.is_some_and(|prev| prev >= key) {
                    return Err(InvariantError::new(format!(
                        "keys not strictly increasing at level {level}"
                    )));
                }
                prev_key = Some(key);
                current = node.forwards[level];
            }
            if count != expected[level] {
                return Err(InvariantError::new(format!(
                    "level {level} links {count} nodes but {} are tall enough",
                    expected[level]
                )));
            }
        }

        if expected.first().copied().unwrap_or(0) != self.len() {
            return Err(InvariantError::new("level 0 does not link every node"));
        }
        self.arena.check_partition()
    }

    // -- search plumbing --------------------------------------------------

    /// Top-down search. Calls `visit(level, id)` with the rightmost node at
    /// each level whose key is `< key` and returns the level-0 one.
    fn descend(&self, key: &K, mut visit: impl FnMut(usize, SlotId)) -> SlotId {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_search();

        let mut current = HEAD;
        for level in (0..self.max_level).rev() {
            while let Some(next) = self.forward(current, level)
                && self.key_at(next).is_some_and(|k| k < key)
            {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_search_step();
                current = next;
            }
            visit(level, current);
        }
        current
    }

    fn find(&self, key: &K) -> Option<SlotId> {
        let pred = self.descend(key, |_, _| {});
        let candidate = self.forward(pred, 0)?;
        (self.key_at(candidate) == Some(key)).then_some(candidate)
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.max_level && self.rng.random::<f64>() < self.probability {
            level += 1;
        }
        level
    }

    /// Raw forward handle; `NIL` past the node's height.
    #[inline]
    fn link(&self, id: SlotId, level: usize) -> SlotId {
        self.arena
            .get(id)
            .and_then(|node| node.forwards.get(level).copied())
            .unwrap_or(SlotId::NIL)
    }

    #[inline]
    fn forward(&self, id: SlotId, level: usize) -> Option<SlotId> {
        let next = self.link(id, level);
        (!next.is_nil()).then_some(next)
    }

    #[inline]
    fn set_link(&mut self, id: SlotId, level: usize, target: SlotId) {
        if let Some(link) = self
            .arena
            .get_mut(id)
            .and_then(|node| node.forwards.get_mut(level))
        {
            *link = target;
        }
    }

    #[inline]
    fn key_at(&self, id: SlotId) -> Option<&K> {
        self.entry_at(id).map(|(key, _)| key)
    }

    #[inline]
    fn value_at(&self, id: SlotId) -> Option<&V> {
        self.entry_at(id).map(|(_, value)| value)
    }

    #[inline]
    fn entry_at(&self, id: SlotId) -> Option<(&K, &V)> {
        self.arena
            .get(id)?
            .entry
            .as_ref()
            .map(|(key, value)| (key, value))
    }
}

#[cfg(feature = "metrics")]
impl<K: Ord, V, R: Rng> SkipList<K, V, R> {
    pub fn metrics_snapshot(&self) -> SkipListMetricsSnapshot {
        SkipListMetricsSnapshot {
            searches: self.metrics.searches.get(),
            search_steps: self.metrics.search_steps.get(),
            get_hits: self.metrics.get_hits.get(),
            get_misses: self.metrics.get_misses.get(),
            insert_new: self.metrics.insert_new,
            insert_updates: self.metrics.insert_updates,
            insert_rejected: self.metrics.insert_rejected,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            level_histogram: self.metrics.level_histogram.clone(),
            len: self.len(),
            capacity: self.capacity(),
            max_level: self.max_level,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K: Ord, V, R: Rng> MetricsSnapshotProvider<SkipListMetricsSnapshot> for SkipList<K, V, R> {
    fn snapshot(&self) -> SkipListMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K: Ord, V, R: Rng> OrderedMap<K, V> for SkipList<K, V, R> {
    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        SkipList::get(self, key)
    }

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError> {
        SkipList::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> bool {
        SkipList::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.arena.len()
    }

    fn first(&self) -> Option<(&K, &V)> {
        SkipList::first(self)
    }

    fn last(&self) -> Option<(&K, &V)> {
        SkipList::last(self)
    }
}

impl<K, V, R> fmt::Debug for SkipList<K, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipList")
            .field("len", &self.arena.len())
            .field("capacity", &self.arena.capacity())
            .field("max_level", &self.max_level)
            .field("probability", &self.probability)
            .finish_non_exhaustive()
    }
}

/// In-order iterator over a [`SkipList`].
pub struct Iter<'a, K, V, R> {
    list: &'a SkipList<K, V, R>,
    current: SlotId,
}

impl<'a, K: Ord, V, R: Rng> Iterator for Iter<'a, K, V, R> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_nil() {
            return None;
        }
        let list = self.list;
        let id = self.current;
        self.current = list.link(id, 0);
        list.entry_at(id)
    }
}

impl<'a, K: Ord, V, R: Rng> IntoIterator for &'a SkipList<K, V, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Thread-safe skip list: one [`SkipList`] behind a `parking_lot::RwLock`.
///
/// Lookups share the read lock; every mutation takes the write lock for
/// the whole splice.
#[cfg(feature = "concurrency")]
pub struct ConcurrentSkipList<K, V, R = SmallRng> {
    inner: Arc<RwLock<SkipList<K, V, R>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V, R> Clone for ConcurrentSkipList<K, V, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K: Ord, V> ConcurrentSkipList<K, V, SmallRng> {
    pub fn new(max_level: usize, probability: f64, capacity: usize) -> Result<Self, ConfigError> {
        SkipList::new(max_level, probability, capacity).map(Self::from)
    }
}

#[cfg(feature = "concurrency")]
impl<K: Ord, V, R: Rng> From<SkipList<K, V, R>> for ConcurrentSkipList<K, V, R> {
    fn from(list: SkipList<K, V, R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(list)),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K: Ord, V, R: Rng> ConcurrentSkipList<K, V, R> {
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn get_with<T>(&self, key: &K, f: impl FnOnce(&V) -> T) -> Option<T> {
        self.inner.read().get(key).map(f)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn insert(&self, key: K, value: V) -> Result<Option<V>, CapacityError> {
        self.inner.write().insert(key, value)
    }

    pub fn remove(&self, key: &K) -> bool {
        self.inner.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Clones every entry in key order under one read lock.
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}
