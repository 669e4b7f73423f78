//! # Trait Hierarchy
//!
//! Shared interfaces for the arena-backed structures, so callers and tests
//! can be written against behavior instead of a concrete type.
//!
//! ```text
//!   ┌──────────────────────────────────────┐      ┌──────────────────────────────────────┐
//!   │           CoreCache<K, V>            │      │           OrderedMap<K, V>           │
//!   │                                      │      │                                      │
//!   │  insert(&mut, K, V) → Result<Opt<V>> │      │  get(&, &K) → Option<&V>             │
//!   │  get(&mut, &K) → Option<&V>          │      │  insert(&mut, K, V) → Result<Opt<V>> │
//!   │  contains / len / capacity / clear   │      │  remove(&mut, &K) → bool             │
//!   └──────────────────┬───────────────────┘      │  first / last / len                  │
//!                      │                          └──────────────────────────────────────┘
//!                      ▼
//!   ┌──────────────────────────────────────┐
//!   │          MutableCache<K, V>          │
//!   │  remove(&K) → Option<V>              │
//!   └──────────────────┬───────────────────┘
//!                      ▼
//!   ┌──────────────────────────────────────┐
//!   │         LruCacheTrait<K, V>          │
//!   │  pop_lru / peek_lru / touch          │
//!   │  recency_rank                        │
//!   └──────────────────────────────────────┘
//! ```
//!
//! | Trait           | Extends        | Implemented by                        |
//! |-----------------|----------------|---------------------------------------|
//! | `CoreCache`     | -              | [`LruCache`](crate::policy::lru::LruCache) |
//! | `MutableCache`  | `CoreCache`    | [`LruCache`](crate::policy::lru::LruCache) |
//! | `LruCacheTrait` | `MutableCache` | [`LruCache`](crate::policy::lru::LruCache) |
//! | `OrderedMap`    | -              | [`SkipList`](crate::ds::skip_list::SkipList) |
//!
//! Inserts return `Result` because every implementor sits on a
//! fixed-capacity arena: running out of slots is reported, never hidden.

use crate::error::CapacityError;

/// Operations every bounded cache supports.
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the previous value on update.
    ///
    /// May evict another entry to make room.
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError>;

    /// Looks up `key`, updating whatever recency state the policy keeps.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is cached. Never changes policy state.
    fn contains(&self, key: &K) -> bool;

    /// Number of cached entries.
    fn len(&self) -> usize;

    /// Returns `true` if no entries are cached.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes every entry.
    fn clear(&mut self);
}

/// Caches that allow removal of arbitrary keys.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key` and returns its value, if present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys, returning one result per key in order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-ordered caches.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without changing the order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being most recently used.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Key-ordered maps.
pub trait OrderedMap<K, V> {
    /// Looks up `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Inserts or updates `key`, returning the previous value on update.
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError>;

    /// Removes `key`; returns `false` if it was absent.
    fn remove(&mut self, key: &K) -> bool;

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry with the smallest key.
    fn first(&self) -> Option<(&K, &V)>;

    /// Entry with the largest key.
    fn last(&self) -> Option<(&K, &V)>;
}
