#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before the first call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SkipListMetricsSnapshot {
    pub searches: u64,
    pub search_steps: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejected: u64,
    pub remove_calls: u64,
    pub remove_found: u64,

    /// `level_histogram[i]` counts inserted nodes that drew level `i + 1`.
    pub level_histogram: Vec<u64>,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
    pub max_level: usize,
}

impl SkipListMetricsSnapshot {
    /// Average forward-pointer hops per search.
    pub fn mean_search_steps(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.search_steps as f64 / self.searches as f64
        }
    }
}
