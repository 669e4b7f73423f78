use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::{LruMetricsSnapshot, SkipListMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for metrics snapshots.
///
/// Writes the Prometheus text exposition format so output can be scraped
/// directly or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_lines(&self, lines: &[String]) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Export is best effort; a failed write must not disturb the caller.
        for line in lines {
            let _ = writeln!(writer, "{}", line);
        }
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        self.write_lines(&[
            format!("# TYPE {} {}", name, kind),
            format!("{} {}", name, value),
        ]);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_updates_total", snapshot.insert_updates);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("evict_calls_total", snapshot.evict_calls);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("pop_lru_calls_total", snapshot.pop_lru_calls);
        self.write_counter("pop_lru_found_total", snapshot.pop_lru_found);
        self.write_counter("peek_calls_total", snapshot.peek_calls);
        self.write_counter("peek_found_total", snapshot.peek_found);
        self.write_counter("touch_calls_total", snapshot.touch_calls);
        self.write_counter("touch_found_total", snapshot.touch_found);
        self.write_counter("remove_calls_total", snapshot.remove_calls);
        self.write_counter("remove_found_total", snapshot.remove_found);
        self.write_counter("recency_rank_calls_total", snapshot.recency_rank_calls);
        self.write_counter("recency_rank_found_total", snapshot.recency_rank_found);
        self.write_counter(
            "recency_rank_scan_steps_total",
            snapshot.recency_rank_scan_steps,
        );
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}

impl<W: Write + Send + Sync> MetricsExporter<SkipListMetricsSnapshot>
    for PrometheusTextExporter<W>
{
    fn export(&self, snapshot: &SkipListMetricsSnapshot) {
        self.write_counter("searches_total", snapshot.searches);
        self.write_counter("search_steps_total", snapshot.search_steps);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("insert_updates_total", snapshot.insert_updates);
        self.write_counter("insert_rejected_total", snapshot.insert_rejected);
        self.write_counter("remove_calls_total", snapshot.remove_calls);
        self.write_counter("remove_found_total", snapshot.remove_found);

        let name = self.metric_name("level_nodes_total");
        let mut lines = vec![format!("# TYPE {} counter", name)];
        lines.extend(
            snapshot
                .level_histogram
                .iter()
                .enumerate()
                .map(|(idx, count)| format!("{}{{level=\"{}\"}} {}", name, idx + 1, count)),
        );
        self.write_lines(&lines);

        self.write_gauge("len", snapshot.len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
        self.write_gauge("max_level", snapshot.max_level as u64);
    }
}
