pub mod lru;

#[cfg(feature = "concurrency")]
pub use lru::ConcurrentLruCache;
pub use lru::LruCache;
