pub use crate::builder::SkipListBuilder;
pub use crate::ds::{BloomFilter, Full, RingBuffer, SkipList};
#[cfg(feature = "concurrency")]
pub use crate::ds::ConcurrentSkipList;
pub use crate::error::{CapacityError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{LruMetricsSnapshot, MetricsSnapshotProvider, SkipListMetricsSnapshot};
pub use crate::numeric::{Complex, Matrix};
#[cfg(feature = "concurrency")]
pub use crate::policy::ConcurrentLruCache;
pub use crate::policy::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache, OrderedMap};
