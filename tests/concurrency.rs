// ==============================================
// COARSE-LOCK WRAPPER TESTS (integration)
// ==============================================
//
// Hammer the concurrent wrappers from several threads and check that the
// wrapped structure is intact afterwards.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use arenakit::ds::skip_list::ConcurrentSkipList;
use arenakit::policy::lru::ConcurrentLruCache;

const THREADS: usize = 8;

// ==============================================
// LRU: mixed readers and writers on a small cache
// ==============================================

mod lru {
    use super::*;

    #[test]
    fn mixed_operations_preserve_invariants() {
        let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(32);
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS as u64)
            .map(|t| {
                let cache = cache.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..2_000u64 {
                        let key = (t * 7 + i) % 64;
                        match i % 5 {
                            0 => {
                                cache.remove(&key);
                            },
                            1 => {
                                cache.touch(&key);
                            },
                            2 => {
                                if let Some(v) = cache.get(&key) {
                                    assert_eq!(v % 1_000, key);
                                }
                            },
                            _ => cache.put(key, i * 1_000 + key).unwrap(),
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 32);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn pop_lru_drains_each_entry_once() {
        let cache = ConcurrentLruCache::new(1_000);
        for i in 0..1_000u32 {
            cache.put(i, i).unwrap();
        }
        let barrier = Arc::new(Barrier::new(THREADS));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let cache = cache.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut popped = Vec::new();
                    while let Some((k, _)) = cache.pop_lru() {
                        popped.push(k);
                    }
                    popped
                })
            })
            .collect();

        let mut all: Vec<u32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..1_000).collect::<Vec<_>>());
        assert!(cache.is_empty());
    }
}

// ==============================================
// Skip list: concurrent inserts and lookups
// ==============================================

mod skip_list {
    use super::*;

    #[test]
    fn disjoint_writers_then_readers() {
        let list: ConcurrentSkipList<u32, u32> = ConcurrentSkipList::new(12, 0.5, 4_096).unwrap();
        let barrier = Arc::new(Barrier::new(THREADS));

        let writers: Vec<_> = (0..THREADS as u32)
            .map(|t| {
                let list = list.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..400u32 {
                        let key = i * THREADS as u32 + t;
                        list.insert(key, key * 2).unwrap();
                        if i % 4 == 0 {
                            assert!(list.remove(&key));
                        }
                    }
                })
            })
            .collect();
        for handle in writers {
            handle.join().unwrap();
        }

        let expected = THREADS * 300;
        assert_eq!(list.len(), expected);
        list.check_invariants().unwrap();

        let readers: Vec<_> = (0..THREADS as u32)
            .map(|t| {
                let list = list.clone();
                thread::spawn(move || {
                    (0..400u32)
                        .map(|i| i * THREADS as u32 + t)
                        .filter(|key| list.get_with(key, |v| *v == key * 2).unwrap_or(false))
                        .count()
                })
            })
            .collect();
        let found: usize = readers.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(found, expected);
    }
}
