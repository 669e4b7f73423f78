pub mod bloom_filter;
pub mod ring_buffer;
pub mod skip_list;
pub(crate) mod slot_arena;

pub use bloom_filter::BloomFilter;
pub use ring_buffer::{Full, RingBuffer};
#[cfg(feature = "concurrency")]
pub use skip_list::ConcurrentSkipList;
pub use skip_list::{MAX_LEVEL_LIMIT, SkipList};
