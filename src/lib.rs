//! arenakit: arena-indexed LRU cache and skip list, plus a few leaf
//! utilities (ring buffer, Bloom filter, matrix, FFT, statistics).
//!
//! Both core structures link their nodes by integer handles into a
//! fixed-capacity slot pool instead of pointers. The pool never grows:
//! free and live slots always partition the non-sentinel range, sentinel
//! slots are never recycled, and running out of slots is reported as
//! [`CapacityError`](error::CapacityError).
//!
//! - [`policy::lru`]: `len <= capacity`, and the recency chain from the
//!   head sentinel reaches the tail sentinel in exactly `len` steps.
//! - [`ds::skip_list`]: keys strictly increase along every level, and a
//!   node is linked only at levels below the height drawn at insertion.
//!
//! Both expose `check_invariants()` to verify these at runtime.

pub mod builder;
pub mod ds;
pub mod error;
pub mod numeric;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
