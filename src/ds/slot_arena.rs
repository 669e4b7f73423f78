//! Fixed-capacity slot arena with reserved sentinel slots.
//!
//! Both arena-backed structures in this crate ([`LruCache`] and [`SkipList`])
//! store their nodes here and link them by [`SlotId`] instead of pointers.
//!
//! ## Layout
//!
//! ```text
//!   index:   0          1          2      3      4      5
//!          ┌──────────┬──────────┬──────┬──────┬──────┬──────┐
//!   slots: │ sentinel │ sentinel │ live │ free │ live │ free │
//!          └──────────┴──────────┴──────┴──────┴──────┴──────┘
//!          └─ reserved, never ──┘ └──── capacity allocatable ─┘
//!             on the free list
//!
//!   free_list (LIFO): [5, 3]   pop ─► 3
//! ```
//!
//! ## Invariants
//! - `free ∪ live == {reserved .. reserved + capacity}`
//! - `free ∩ live == ∅`, and no sentinel index is ever on the free list
//! - the arena never grows; `allocate` on an empty free list is a
//!   [`CapacityError`]
//!
//! Callers must unlink a node from every link that references it before
//! calling [`release`](SlotArena::release).
//!
//! [`LruCache`]: crate::policy::lru::LruCache
//! [`SkipList`]: crate::ds::skip_list::SkipList

use crate::error::{CapacityError, InvariantError};

/// Handle to a slot inside a [`SlotArena`].
///
/// Only meaningful to the structure that owns the arena; never handed out
/// through the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

impl SlotId {
    /// Reserved handle that never refers to a slot.
    pub(crate) const NIL: SlotId = SlotId(usize::MAX);

    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

#[derive(Debug)]
pub(crate) struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    reserved: usize,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an arena with `capacity` allocatable slots placed after the
    /// given sentinels. Sentinel `i` lives at index `i`.
    pub(crate) fn with_sentinels(capacity: usize, sentinels: Vec<T>) -> Self {
        let reserved = sentinels.len();
        let total = reserved + capacity;
        let mut slots = Vec::with_capacity(total);
        slots.extend(sentinels.into_iter().map(Some));
        slots.resize_with(total, || None);
        // Reverse order so the lowest free index is popped first.
        let free_list = (reserved..total).rev().collect();
        Self {
            slots,
            free_list,
            reserved,
            len: 0,
        }
    }

    /// Takes a slot from the free list and stores `value` in it.
    pub(crate) fn allocate(&mut self, value: T) -> Result<SlotId, CapacityError> {
        let idx = self
            .free_list
            .pop()
            .ok_or_else(|| CapacityError::new(self.capacity()))?;
        debug_assert!(self.slots[idx].is_none());
        self.slots[idx] = Some(value);
        self.len += 1;
        Ok(SlotId(idx))
    }

    /// Clears a live slot and returns its handle to the free list.
    ///
    /// Returns `None` for sentinels, out-of-range handles and free slots.
    pub(crate) fn release(&mut self, id: SlotId) -> Option<T> {
        if self.is_sentinel(id) {
            return None;
        }
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    #[inline]
    pub(crate) fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub(crate) fn contains(&self, id: SlotId) -> bool {
        !self.is_sentinel(id) && self.get(id).is_some()
    }

    #[inline]
    pub(crate) fn is_sentinel(&self, id: SlotId) -> bool {
        id.0 < self.reserved
    }

    /// Number of live, non-sentinel slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of allocatable (non-sentinel) slots.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len() - self.reserved
    }

    #[inline]
    pub(crate) fn free_len(&self) -> usize {
        self.free_list.len()
    }

    /// Frees every non-sentinel slot. Sentinels keep their current contents.
    pub(crate) fn clear(&mut self) {
        let total = self.slots.len();
        for slot in &mut self.slots[self.reserved..] {
            *slot = None;
        }
        self.free_list.clear();
        self.free_list.extend((self.reserved..total).rev());
        self.len = 0;
    }

    /// Iterates over live non-sentinel slots in index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .skip(self.reserved)
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }

    /// Approximate heap footprint in bytes.
    pub(crate) fn approx_bytes(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Option<T>>()
            + self.free_list.capacity() * std::mem::size_of::<usize>()
    }

    /// Verifies that free and live slots partition the non-sentinel range.
    pub(crate) fn check_partition(&self) -> Result<(), InvariantError> {
        for idx in 0..self.reserved {
            if self.slots[idx].is_none() {
                return Err(InvariantError::new(format!("sentinel slot {idx} is empty")));
            }
        }

        let mut on_free_list = vec![false; self.slots.len()];
        for &idx in &self.free_list {
            if idx < self.reserved {
                return Err(InvariantError::new(format!(
                    "sentinel slot {idx} is on the free list"
                )));
            }
            let seen = on_free_list.get_mut(idx).ok_or_else(|| {
                InvariantError::new(format!("free list holds out-of-range index {idx}"))
            })?;
            if *seen {
                return Err(InvariantError::new(format!(
                    "index {idx} appears twice on the free list"
                )));
            }
            *seen = true;
            if self.slots[idx].is_some() {
                return Err(InvariantError::new(format!(
                    "index {idx} is both live and free"
                )));
            }
        }

        let live = self.slots[self.reserved..]
            .iter()
            .filter(|slot| slot.is_some())
            .count();
        if live != self.len {
            return Err(InvariantError::new(format!(
                "live slot count {live} != tracked len {}",
                self.len
            )));
        }
        if live + self.free_list.len() != self.capacity() {
            return Err(InvariantError::new(format!(
                "live {live} + free {} != capacity {}",
                self.free_list.len(),
                self.capacity()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_release_reuses_lifo() {
        let mut arena = SlotArena::with_sentinels(3, vec!["head"]);
        let a = arena.allocate("a").unwrap();
        let b = arena.allocate("b").unwrap();
        assert_eq!(a.index(), 1);
        assert_eq!(b.index(), 2);
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.release(a), Some("a"));
        assert_eq!(arena.len(), 1);

        let c = arena.allocate("c").unwrap();
        assert_eq!(c.index(), a.index());
        assert_eq!(arena.get(c), Some(&"c"));
        arena.check_partition().unwrap();
    }

    #[test]
    fn exhaustion_is_reported() {
        let mut arena = SlotArena::with_sentinels(2, vec![(), ()]);
        arena.allocate(()).unwrap();
        arena.allocate(()).unwrap();
        let err = arena.allocate(()).unwrap_err();
        assert_eq!(err.capacity(), 2);
        assert_eq!(arena.free_len(), 0);
        arena.check_partition().unwrap();
    }

    #[test]
    fn zero_capacity_arena_only_holds_sentinels() {
        let mut arena = SlotArena::with_sentinels(0, vec![0u8]);
        assert_eq!(arena.capacity(), 0);
        assert!(arena.allocate(1).is_err());
        assert_eq!(arena.get(SlotId::new(0)), Some(&0));
        arena.check_partition().unwrap();
    }

    #[test]
    fn sentinels_cannot_be_released() {
        let mut arena = SlotArena::with_sentinels(1, vec![10, 20]);
        assert!(arena.is_sentinel(SlotId::new(0)));
        assert!(arena.is_sentinel(SlotId::new(1)));
        assert_eq!(arena.release(SlotId::new(0)), None);
        assert_eq!(arena.get(SlotId::new(1)), Some(&20));
        assert!(!arena.contains(SlotId::new(0)));
        arena.check_partition().unwrap();
    }

    #[test]
    fn double_release_and_nil_are_rejected() {
        let mut arena = SlotArena::with_sentinels(2, vec![()]);
        let id = arena.allocate(()).unwrap();
        assert!(arena.release(id).is_some());
        assert!(arena.release(id).is_none());
        assert!(arena.release(SlotId::NIL).is_none());
        assert!(arena.get(SlotId::NIL).is_none());
        arena.check_partition().unwrap();
    }

    #[test]
    fn clear_frees_everything_but_sentinels() {
        let mut arena = SlotArena::with_sentinels(4, vec!['h', 't']);
        for c in ['a', 'b', 'c'] {
            arena.allocate(c).unwrap();
        }
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.free_len(), 4);
        assert_eq!(arena.get(SlotId::new(0)), Some(&'h'));
        assert_eq!(arena.get(SlotId::new(1)), Some(&'t'));
        assert_eq!(arena.allocate('x').unwrap().index(), 2);
        arena.check_partition().unwrap();
    }

    #[test]
    fn iter_skips_sentinels_and_free_slots() {
        let mut arena = SlotArena::with_sentinels(3, vec![0]);
        let a = arena.allocate(1).unwrap();
        let b = arena.allocate(2).unwrap();
        arena.allocate(3).unwrap();
        arena.release(b);
        let live: Vec<_> = arena.iter().map(|(id, v)| (id.index(), *v)).collect();
        assert_eq!(live, vec![(a.index(), 1), (3, 3)]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_free_and_live_partition_slots(
                capacity in 0usize..16,
                ops in prop::collection::vec(any::<(bool, u8)>(), 0..64)
            ) {
                let mut arena = SlotArena::with_sentinels(capacity, vec![u8::MAX, u8::MAX]);
                let mut live = Vec::new();
                for (alloc, byte) in ops {
                    if alloc || live.is_empty() {
                        match arena.allocate(byte) {
                            Ok(id) => live.push(id),
                            Err(_) => prop_assert_eq!(live.len(), capacity),
                        }
                    } else {
                        let id = live.swap_remove(byte as usize % live.len());
                        prop_assert!(arena.release(id).is_some());
                    }
                    prop_assert_eq!(arena.len(), live.len());
                    prop_assert_eq!(arena.len() + arena.free_len(), capacity);
                    prop_assert!(arena.check_partition().is_ok());
                }
            }
        }
    }
}
