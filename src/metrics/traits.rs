//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so that
//! the data structures only ever write counters.
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │     CoreMetricsRecorder     │
//!                    │  get_hit/get_miss/insert    │
//!                    │  evict/clear                │
//!                    └──────────────┬──────────────┘
//!                                   │
//!               ┌───────────────────┴───────────────────┐
//!               ▼                                       ▼
//!        ┌──────────────┐                       ┌──────────────────┐
//!        │     Lru      │                       │     SkipList     │
//!        │   Recorder   │                       │     Recorder     │
//!        └──────────────┘                       └──────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any arena-backed structure.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
}

/// Read-only LRU metrics for `&self` methods (uses interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Metrics for skip-list mutations.
pub trait SkipListMetricsRecorder {
    fn record_insert_new(&mut self, level: usize);
    fn record_insert_update(&mut self);
    fn record_insert_rejected(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_clear(&mut self);
}

/// Read-only skip-list metrics; `get` takes `&self`.
pub trait SkipListMetricsReadRecorder {
    fn record_search(&self);
    fn record_search_step(&self);
    fn record_get_hit(&self);
    fn record_get_miss(&self);
}

/// Produces a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
