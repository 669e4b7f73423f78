use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, SkipListMetricsReadRecorder,
    SkipListMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct LruMetrics {
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
    pub touch_calls: u64,
    pub touch_found: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {}
}

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
}

impl LruMetricsReadRecorder for &LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

#[derive(Debug, Default)]
pub struct SkipListMetrics {
    pub searches: MetricsCell,
    pub search_steps: MetricsCell,
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejected: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub level_histogram: Vec<u64>,
}

impl SkipListMetrics {
    pub fn with_max_level(max_level: usize) -> Self {
        Self {
            level_histogram: vec![0; max_level],
            ..Self::default()
        }
    }
}

impl SkipListMetricsRecorder for SkipListMetrics {
    fn record_insert_new(&mut self, level: usize) {
        self.insert_new += 1;
        if let Some(bucket) = level
            .checked_sub(1)
            .and_then(|idx| self.level_histogram.get_mut(idx))
        {
            *bucket += 1;
        }
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_clear(&mut self) {}
}

impl SkipListMetricsReadRecorder for &SkipListMetrics {
    fn record_search(&self) {
        self.searches.incr();
    }

    fn record_search_step(&self) {
        self.search_steps.incr();
    }

    fn record_get_hit(&self) {
        self.get_hits.incr();
    }

    fn record_get_miss(&self) {
        self.get_misses.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_core_counters_accumulate() {
        let mut m = LruMetrics::default();
        m.record_get_hit();
        m.record_get_miss();
        m.record_get_miss();
        assert_eq!(m.get_calls, 3);
        assert_eq!(m.get_hits, 1);
        assert_eq!(m.get_misses, 2);

        (&m).record_peek_call();
        assert_eq!(m.peek_calls.get(), 1);
    }

    #[test]
    fn skip_list_histogram_ignores_out_of_range_levels() {
        let mut m = SkipListMetrics::with_max_level(3);
        m.record_insert_new(1);
        m.record_insert_new(3);
        m.record_insert_new(0);
        m.record_insert_new(9);
        assert_eq!(m.insert_new, 4);
        assert_eq!(m.level_histogram, vec![1, 0, 1]);
    }
}
