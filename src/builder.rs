//! Builder for skip lists.
//!
//! Collects the geometry (`max_level`, `probability`, `capacity`) and the
//! random source, then validates everything in one place.
//!
//! ## Example
//!
//! ```rust
//! use arenakit::builder::SkipListBuilder;
//!
//! let mut list = SkipListBuilder::new()
//!     .max_level(8)
//!     .capacity(100)
//!     .seed(42)
//!     .build::<u64, String>()
//!     .unwrap();
//! list.insert(1, "hello".to_string()).unwrap();
//! assert_eq!(list.get(&1), Some(&"hello".to_string()));
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ds::skip_list::SkipList;
use crate::error::ConfigError;

/// Default number of levels.
pub const DEFAULT_MAX_LEVEL: usize = 16;
/// Default promotion probability.
pub const DEFAULT_PROBABILITY: f64 = 0.5;
/// Default arena capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Builder for creating [`SkipList`] instances.
#[derive(Debug, Clone)]
pub struct SkipListBuilder {
    max_level: usize,
    probability: f64,
    capacity: usize,
    seed: Option<u64>,
}

impl SkipListBuilder {
    pub fn new() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            capacity: DEFAULT_CAPACITY,
            seed: None,
        }
    }

    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Seeds the level generator so that shapes are reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds a skip list over a [`SmallRng`], seeded if [`seed`](Self::seed)
    /// was called and OS-seeded otherwise.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for an invalid `max_level` or `probability`.
    pub fn build<K: Ord, V>(self) -> Result<SkipList<K, V, SmallRng>, ConfigError> {
        let rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.build_with_rng(rng)
    }

    /// Builds a skip list over a caller-supplied random source. Any
    /// configured seed is ignored.
    pub fn build_with_rng<K: Ord, V, R: Rng>(
        self,
        rng: R,
    ) -> Result<SkipList<K, V, R>, ConfigError> {
        SkipList::with_rng(self.max_level, self.probability, self.capacity, rng)
    }
}

impl Default for SkipListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn defaults() {
        let list = SkipListBuilder::default().build::<u32, u32>().unwrap();
        assert_eq!(list.max_level(), DEFAULT_MAX_LEVEL);
        assert_eq!(list.probability(), DEFAULT_PROBABILITY);
        assert_eq!(list.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        assert!(SkipListBuilder::new().max_level(0).build::<u8, u8>().is_err());
        assert!(SkipListBuilder::new().probability(1.0).build::<u8, u8>().is_err());
    }

    #[test]
    fn seed_makes_levels_reproducible() {
        let shape = || {
            let mut list = SkipListBuilder::new()
                .max_level(10)
                .capacity(512)
                .seed(99)
                .build::<u32, ()>()
                .unwrap();
            for k in 0..500 {
                list.insert(k, ()).unwrap();
            }
            list.level_counts()
        };
        assert_eq!(shape(), shape());
    }

    #[test]
    fn custom_rng() {
        let mut list = SkipListBuilder::new()
            .capacity(4)
            .build_with_rng::<u8, u8, _>(StdRng::seed_from_u64(3))
            .unwrap();
        list.insert(1, 1).unwrap();
        assert_eq!(list.capacity(), 4);
        assert_eq!(list.len(), 1);
    }
}
