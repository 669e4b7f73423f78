//! Bit-array Bloom filter.
//!
//! `add` sets `k` bit positions, each derived from an independently seeded
//! [`FxHasher`] pass over the item. `contains` answers `true` only if all `k`
//! positions are set: false positives are possible, false negatives are not.

use std::f64::consts::LN_2;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: Vec<u64>,
    num_bits: usize,
    num_hashes: u32,
    count: usize,
}

impl BloomFilter {
    /// Creates a filter with `num_bits` bits and `num_hashes` hash passes.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if either parameter is zero.
    pub fn try_new(num_bits: usize, num_hashes: u32) -> Result<Self, ConfigError> {
        if num_bits == 0 {
            return Err(ConfigError::new("num_bits must be at least 1"));
        }
        if num_hashes == 0 {
            return Err(ConfigError::new("num_hashes must be at least 1"));
        }
        Ok(Self {
            bits: vec![0u64; num_bits.div_ceil(64)],
            num_bits,
            num_hashes,
            count: 0,
        })
    }

    /// Like [`try_new`](Self::try_new).
    ///
    /// # Panics
    ///
    /// If either parameter is zero.
    pub fn new(num_bits: usize, num_hashes: u32) -> Self {
        match Self::try_new(num_bits, num_hashes) {
            Ok(filter) => filter,
            Err(err) => panic!("invalid bloom filter: {err}"),
        }
    }

    /// Sizes the filter for `expected_items` at the target false positive
    /// rate.
    ///
    /// ```
    /// use arenakit::ds::bloom_filter::BloomFilter;
    ///
    /// let filter = BloomFilter::with_rate(1_000, 0.01).unwrap();
    /// assert!(filter.num_bits() >= 9_000);
    /// assert_eq!(filter.num_hashes(), 7);
    /// ```
    pub fn with_rate(expected_items: usize, false_positive_rate: f64) -> Result<Self, ConfigError> {
        if expected_items == 0 {
            return Err(ConfigError::new("expected_items must be at least 1"));
        }
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(ConfigError::new(format!(
                "false_positive_rate must be in (0, 1), got {false_positive_rate}"
            )));
        }
        let num_bits = Self::optimal_bits(expected_items, false_positive_rate);
        let num_hashes = Self::optimal_hashes(num_bits, expected_items);
        Self::try_new(num_bits, num_hashes)
    }

    pub fn add<T: Hash + ?Sized>(&mut self, item: &T) {
        for seed in 0..self.num_hashes {
            let (word, mask) = self.position(item, seed);
            self.bits[word] |= mask;
        }
        self.count += 1;
    }

    /// `false` means definitely absent; `true` means possibly present.
    pub fn contains<T: Hash + ?Sized>(&self, item: &T) -> bool {
        (0..self.num_hashes).all(|seed| {
            let (word, mask) = self.position(item, seed);
            self.bits[word] & mask != 0
        })
    }

    /// Number of `add` calls since creation or the last `clear`.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    pub fn clear(&mut self) {
        self.bits.fill(0);
        self.count = 0;
    }

    /// False positive rate implied by the current fill ratio.
    pub fn estimated_fpr(&self) -> f64 {
        let set_bits: usize = self.bits.iter().map(|w| w.count_ones() as usize).sum();
        let fill_ratio = set_bits as f64 / self.num_bits as f64;
        fill_ratio.powi(self.num_hashes as i32)
    }

    fn position<T: Hash + ?Sized>(&self, item: &T, seed: u32) -> (usize, u64) {
        let mut hasher = FxHasher::default();
        seed.hash(&mut hasher);
        item.hash(&mut hasher);
        let bit = (hasher.finish() % self.num_bits as u64) as usize;
        (bit / 64, 1u64 << (bit % 64))
    }

    // m = -n * ln(p) / ln(2)^2
    fn optimal_bits(expected_items: usize, fpr: f64) -> usize {
        (-(expected_items as f64) * fpr.ln() / (LN_2 * LN_2)).ceil() as usize
    }

    // k = (m / n) * ln(2)
    fn optimal_hashes(num_bits: usize, expected_items: usize) -> u32 {
        let k = (num_bits as f64 / expected_items as f64) * LN_2;
        (k.round() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_items_are_always_found() {
        let mut filter = BloomFilter::with_rate(500, 0.01).unwrap();
        for i in 0..500u32 {
            filter.add(&i);
        }
        assert!((0..500u32).all(|i| filter.contains(&i)));
        assert_eq!(filter.count(), 500);
    }

    #[test]
    fn false_positive_rate_is_near_target() {
        let mut filter = BloomFilter::with_rate(1_000, 0.01).unwrap();
        for i in 0..1_000u64 {
            filter.add(&i);
        }
        let false_positives = (1_000_000..1_010_000u64)
            .filter(|i| filter.contains(i))
            .count();
        assert!(false_positives < 300, "false positives: {false_positives}");
        assert!(filter.estimated_fpr() < 0.03);
    }

    #[test]
    fn empty_filter_contains_nothing() {
        let filter = BloomFilter::new(128, 3);
        assert!(!filter.contains("anything"));
        assert_eq!(filter.estimated_fpr(), 0.0);
    }

    #[test]
    fn clear_forgets_items() {
        let mut filter = BloomFilter::new(256, 4);
        filter.add("x");
        assert!(filter.contains("x"));
        filter.clear();
        assert!(!filter.contains("x"));
        assert_eq!(filter.count(), 0);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(BloomFilter::try_new(0, 3).is_err());
        assert!(BloomFilter::try_new(64, 0).is_err());
        assert!(BloomFilter::with_rate(0, 0.01).is_err());
        assert!(BloomFilter::with_rate(10, 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "invalid bloom filter")]
    fn new_panics_on_zero_bits() {
        let _ = BloomFilter::new(0, 1);
    }

    #[test]
    fn bit_count_not_multiple_of_word() {
        let mut filter = BloomFilter::new(70, 2);
        for i in 0..20 {
            filter.add(&i);
        }
        assert!((0..20).all(|i| filter.contains(&i)));
    }
}
