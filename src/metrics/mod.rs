//! Operation counters for the arena-backed structures (feature `metrics`).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use snapshot::{LruMetricsSnapshot, SkipListMetricsSnapshot};
pub use traits::{MetricsExporter, MetricsSnapshotProvider};
