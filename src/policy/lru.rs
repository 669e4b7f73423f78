//! # Least Recently Used (LRU) Cache
//!
//! Capacity-bounded cache with O(1) `get`/`put`, built on a fixed-size
//! [`SlotArena`](crate::ds::slot_arena) instead of heap-allocated nodes.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                                 │
//!   │                                                                          │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>                                            │   │
//!   │   │  ┌─────────┬──────────┐                                          │   │
//!   │   │  │  key_a  │  slot 4  │──────────────────────┐                   │   │
//!   │   │  │  key_b  │  slot 2  │────────────┐         │                   │   │
//!   │   │  │  key_c  │  slot 3  │──┐         │         │                   │   │
//!   │   │  └─────────┴──────────┘  │         │         │                   │   │
//!   │   └──────────────────────────┼─────────┼─────────┼───────────────────┘   │
//!   │                              ▼         ▼         ▼                       │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  SlotArena<Node<K, V>>   (capacity + 2 slots)                    │   │
//!   │   │                                                                  │   │
//!   │   │  [0] HEAD ⇄ [3] c ⇄ [2] b ⇄ [4] a ⇄ [1] TAIL ⇄ (back to HEAD)    │   │
//!   │   │      sentinel   MRU             LRU    sentinel                  │   │
//!   │   └──────────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two sentinels occupy slots 0 and 1 for the lifetime of the cache.
//! They never hold entries and are never returned to the free list, so
//! splicing never has to special-case an empty list or a list end.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) on a full cache (capacity = 3)
//!
//!     HEAD ⇄ [A] ⇄ [B] ⇄ [C] ⇄ TAIL
//!             MRU         LRU
//!
//!     1. victim = TAIL.prev = C; drop C from the index, unlink, release slot
//!     2. allocate slot for D (reuses C's slot), link after HEAD, index it
//!
//!     HEAD ⇄ [D] ⇄ [A] ⇄ [B] ⇄ TAIL
//!
//!   get(B)
//!     1. index lookup: O(1)
//!     2. unlink B, relink after HEAD
//!
//!     HEAD ⇄ [B] ⇄ [D] ⇄ [A] ⇄ TAIL
//! ```
//!
//! ## Methods
//!
//! | Method             | Complexity | Description                           |
//! |--------------------|------------|---------------------------------------|
//! | `new(capacity)`    | O(n)       | Pre-sizes arena and index             |
//! | `get(&k)`          | O(1)       | Lookup, moves entry to MRU            |
//! | `put(k, v)`        | O(1)       | Insert or update, may evict LRU       |
//! | `peek(&k)`         | O(1)       | Lookup without reordering             |
//! | `remove(&k)`       | O(1)       | Unlink and release                    |
//! | `pop_lru()`        | O(1)       | Remove and return the LRU entry       |
//! | `touch(&k)`        | O(1)       | Move to MRU without reading           |
//! | `recency_rank(&k)` | O(n)       | Position in recency order (0 = MRU)   |
//! | `iter()`           | O(n)       | MRU → LRU traversal                   |
//!
//! ## Thread Safety
//!
//! - `LruCache`: single-threaded; every operation runs to completion before
//!   returning, so no caller can observe a half-spliced chain.
//! - `ConcurrentLruCache` (feature `concurrency`): the whole cache behind one
//!   `parking_lot::Mutex`. `get` reorders the chain, so reads take the same
//!   exclusive lock as writes.
//!
//! ## Example
//!
//! ```
//! use arenakit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1).unwrap();
//! cache.put("b", 2).unwrap();
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! cache.put("c", 3).unwrap();
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"a"), Some(&1));
//! assert_eq!(cache.get(&"c"), Some(&3));
//! ```

use std::fmt;
use std::hash::Hash;
use std::mem;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{CapacityError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

const HEAD: SlotId = SlotId::new(0);
const TAIL: SlotId = SlotId::new(1);

/// Arena node. `entry` is `None` only for the two sentinels.
#[derive(Debug)]
struct Node<K, V> {
    prev: SlotId,
    next: SlotId,
    entry: Option<(K, V)>,
}

impl<K, V> Node<K, V> {
    fn sentinel(prev: SlotId, next: SlotId) -> Self {
        Self {
            prev,
            next,
            entry: None,
        }
    }
}

/// Single-threaded LRU cache over a fixed-capacity slot arena.
///
/// Holds at most `capacity` entries. Inserting a new key into a full cache
/// evicts exactly one entry, the one immediately before the tail sentinel.
/// A capacity of 0 creates a cache that accepts no entries.
pub struct LruCache<K, V> {
    arena: SlotArena<Node<K, V>>,
    map: FxHashMap<K, SlotId>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Allocates `capacity + 2` arena slots up front; the cache never
    /// allocates nodes afterwards.
    ///
    /// # Example
    /// ```
    /// use arenakit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        // Empty circular chain: HEAD ⇄ TAIL.
        let sentinels = vec![Node::sentinel(TAIL, TAIL), Node::sentinel(HEAD, HEAD)];
        debug!(capacity, "created LRU cache");
        Self {
            arena: SlotArena::with_sentinels(capacity, sentinels),
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// This is a mutating read: a hit relinks the entry right after the
    /// head sentinel.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.move_to_front(id);
        self.entry(id).map(|(_, value)| value)
    }

    /// Inserts or updates `key`, making it most recently used.
    ///
    /// On a new key in a full cache the least recently used entry is evicted
    /// first. A zero-capacity cache ignores the call.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the arena has no free slot after
    /// eviction. Eviction always frees one, so this signals a broken
    /// invariant rather than normal traffic.
    pub fn put(&mut self, key: K, value: V) -> Result<(), CapacityError> {
        self.insert(key, value).map(drop)
    }

    /// Like [`put`](Self::put), but returns the replaced value on update.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .arena
                .get_mut(id)
                .and_then(|node| node.entry.as_mut())
                .map(|(_, slot)| mem::replace(slot, value));
            self.move_to_front(id);
            return Ok(previous);
        }

        if self.capacity == 0 {
            return Ok(None);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if self.evict_lru().is_some() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }

        let node = Node {
            prev: HEAD,
            next: TAIL,
            entry: Some((key.clone(), value)),
        };
        let id = self
            .arena
            .allocate(node)
            .inspect_err(|err| warn!(%err, len = self.map.len(), "LRU insert failed"))?;
        self.attach_front(id);
        self.map.insert(key, id);
        Ok(None)
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let &id = self.map.get(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        self.entry(id).map(|(_, value)| value)
    }

    /// Returns `true` if `key` is cached.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.map.remove(key)?;
        let (_, value) = self.unlink_and_release(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let evicted = self.evict_lru()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some(evicted)
    }

    /// Returns the least recently used entry without changing the order.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.lru_id().and_then(|id| self.entry(id))
    }

    /// Marks `key` most recently used; returns `false` if it is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.map.get(key) else {
            return false;
        };
        self.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Position of `key` in recency order, `0` being most recently used.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let &target = self.map.get(key)?;
        let mut current = self.next_of(HEAD)?;
        let mut rank = 0usize;
        while current != TAIL {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();

            if current == target {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_recency_rank_found();
                return Some(rank);
            }
            rank += 1;
            current = self.next_of(current)?;
        }
        None
    }

    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry. Arena slots return to the free list.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.map.clear();
        self.arena.clear();
        if let Some(head) = self.arena.get_mut(HEAD) {
            head.prev = TAIL;
            head.next = TAIL;
        }
        if let Some(tail) = self.arena.get_mut(TAIL) {
            tail.prev = HEAD;
            tail.next = HEAD;
        }
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            cache: self,
            current: self.next_of(HEAD).unwrap_or(TAIL),
            remaining: self.map.len(),
        }
    }

    /// Approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        mem::size_of::<Self>()
            + self.arena.approx_bytes()
            + self.map.capacity() * mem::size_of::<(K, SlotId)>()
    }

    /// Walks the recency chain and the arena, reporting the first broken
    /// invariant.
    ///
    /// Checks that `len <= capacity`, that `next` from the head sentinel
    /// reaches the tail sentinel in exactly `len` steps with matching `prev`
    /// links, that every chained key maps back to its slot, and that free
    /// and live slots partition the arena.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.map.len();
        if len > self.capacity {
            return Err(InvariantError::new(format!(
                "len {len} exceeds capacity {}",
                self.capacity
            )));
        }
        if self.arena.len() != len {
            return Err(InvariantError::new(format!(
                "index holds {len} keys but arena holds {} live nodes",
                self.arena.len()
            )));
        }

        let (head_prev, mut current) = self
            .links(HEAD)
            .ok_or_else(|| InvariantError::new("head sentinel missing"))?;
        if head_prev != TAIL {
            return Err(InvariantError::new("head.prev does not close the circle"));
        }

        let mut prev = HEAD;
        let mut count = 0usize;
        while current != TAIL {
            count += 1;
            if count > len {
                return Err(InvariantError::new(format!(
                    "chain longer than len {len}; cycle or leaked node"
                )));
            }
            let node = self.arena.get(current).ok_or_else(|| {
                InvariantError::new(format!("chain references free slot {}", current.index()))
            })?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has prev {} but is reached from {}",
                    current.index(),
                    node.prev.index(),
                    prev.index()
                )));
            }
            let (key, _) = node.entry.as_ref().ok_or_else(|| {
                InvariantError::new(format!("sentinel slot {} inside chain", current.index()))
            })?;
            if self.map.get(key) != Some(&current) {
                return Err(InvariantError::new(format!(
                    "slot {} is not indexed under its key",
                    current.index()
                )));
            }
            prev = current;
            current = node.next;
        }

        if count != len {
            return Err(InvariantError::new(format!(
                "chain length {count} != len {len}"
            )));
        }
        let (tail_prev, tail_next) = self
            .links(TAIL)
            .ok_or_else(|| InvariantError::new("tail sentinel missing"))?;
        if tail_prev != prev || tail_next != HEAD {
            return Err(InvariantError::new("tail links are inconsistent"));
        }

        self.arena.check_partition()
    }

    // -- chain plumbing ---------------------------------------------------

    #[inline]
    fn links(&self, id: SlotId) -> Option<(SlotId, SlotId)> {
        self.arena.get(id).map(|node| (node.prev, node.next))
    }

    #[inline]
    fn next_of(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).map(|node| node.next)
    }

    #[inline]
    fn entry(&self, id: SlotId) -> Option<(&K, &V)> {
        self.arena
            .get(id)?
            .entry
            .as_ref()
            .map(|(key, value)| (key, value))
    }

    fn lru_id(&self) -> Option<SlotId> {
        let (prev, _) = self.links(TAIL)?;
        (prev != HEAD).then_some(prev)
    }

    /// Splices `id` out of the chain. The node's own links are left stale.
    fn detach(&mut self, id: SlotId) {
        let Some((prev, next)) = self.links(id) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(prev) {
            node.next = next;
        }
        if let Some(node) = self.arena.get_mut(next) {
            node.prev = prev;
        }
    }

    /// Links `id` immediately after the head sentinel.
    fn attach_front(&mut self, id: SlotId) {
        let first = self.next_of(HEAD).unwrap_or(TAIL);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = HEAD;
            node.next = first;
        }
        if let Some(node) = self.arena.get_mut(first) {
            node.prev = id;
        }
        if let Some(head) = self.arena.get_mut(HEAD) {
            head.next = id;
        }
    }

    fn move_to_front(&mut self, id: SlotId) {
        if self.next_of(HEAD) == Some(id) {
            return;
        }
        self.detach(id);
        self.attach_front(id);
    }

    fn unlink_and_release(&mut self, id: SlotId) -> Option<(K, V)> {
        self.detach(id);
        self.arena.release(id)?.entry
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let id = self.lru_id()?;
        let (key, value) = self.unlink_and_release(id)?;
        self.map.remove(&key);
        trace!(slot = id.index(), "evicted least recently used entry");
        Some((key, value))
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.map.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

/// Iterator over `(&K, &V)` from most to least recently used.
pub struct Iter<'a, K, V> {
    cache: &'a LruCache<K, V>,
    current: SlotId,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.current == TAIL {
            return None;
        }
        let node = self.cache.arena.get(self.current)?;
        self.current = node.next;
        self.remaining -= 1;
        node.entry.as_ref().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Thread-safe LRU cache: one [`LruCache`] behind a `parking_lot::Mutex`.
///
/// Every operation, reads included, holds the lock for its full duration.
/// Splicing leaves the chain transiently inconsistent between individual
/// link writes, so no finer-grained locking is offered.
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send,
{
    /// Creates a thread-safe cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Returns a clone of the value for `key`, marking it most recently used.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Runs `f` on the value for `key` under the lock, marking it most
    /// recently used.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().get(key).map(f)
    }

    /// Returns a clone of the value for `key` without reordering.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Inserts or updates `key`.
    pub fn put(&self, key: K, value: V) -> Result<(), CapacityError> {
        self.inner.lock().put(key, value)
    }

    /// Inserts or updates `key`, returning the replaced value.
    pub fn insert(&self, key: K, value: V) -> Result<Option<V>, CapacityError> {
        self.inner.lock().insert(key, value)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.map.len())
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}
