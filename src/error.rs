//! Error types for the arenakit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. `max_level == 0`, a promotion probability outside `(0, 1)`).
//! - [`CapacityError`]: Returned when a fixed-capacity arena has no free slot
//!   left for a new node.
//! - [`InvariantError`]: Returned by `check_invariants` when an internal
//!   structural invariant is violated.
//!
//! Lookup and removal misses are not errors: they surface as `None` or
//! `false`.
//!
//! ## Example Usage
//!
//! ```
//! use arenakit::ds::skip_list::SkipList;
//! use arenakit::error::ConfigError;
//!
//! let list: Result<SkipList<u32, u32>, ConfigError> = SkipList::new(8, 0.5, 64);
//! assert!(list.is_ok());
//!
//! let bad: Result<SkipList<u32, u32>, _> = SkipList::new(8, 1.5, 64);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal structural invariants are violated.
///
/// Produced by `check_invariants` on
/// [`LruCache`](crate::policy::lru::LruCache) and
/// [`SkipList`](crate::ds::skip_list::SkipList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// # Example
///
/// ```
/// use arenakit::ds::skip_list::SkipList;
///
/// let err = SkipList::<u64, u64>::new(0, 0.5, 16).unwrap_err();
/// assert!(err.to_string().contains("max_level"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// CapacityError
// ---------------------------------------------------------------------------

/// Error returned when an arena has no free slot for a new node.
///
/// Arenas never grow, so this is surfaced to the caller instead of
/// reallocating. For [`LruCache`](crate::policy::lru::LruCache) eviction
/// always frees a slot first, so the error is only reachable through a bug.
///
/// # Example
///
/// ```
/// use arenakit::ds::skip_list::SkipList;
///
/// let mut list = SkipList::new(4, 0.5, 1).unwrap();
/// list.insert(1u32, "a").unwrap();
/// let err = list.insert(2, "b").unwrap_err();
/// assert_eq!(err.capacity(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    capacity: usize,
}

impl CapacityError {
    /// Creates a new `CapacityError` for an arena of `capacity` slots.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Returns the number of allocatable slots in the exhausted arena.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arena exhausted: all {} slots are live", self.capacity)
    }
}

impl std::error::Error for CapacityError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("chain length mismatch");
        assert_eq!(err.to_string(), "chain length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("max_level must be at least 1");
        assert_eq!(err.to_string(), "max_level must be at least 1");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad probability");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad probability"));
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    // -- CapacityError ----------------------------------------------------

    #[test]
    fn capacity_display_names_slot_count() {
        let err = CapacityError::new(8);
        assert_eq!(err.to_string(), "arena exhausted: all 8 slots are live");
        assert_eq!(err.capacity(), 8);
    }

    #[test]
    fn capacity_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<CapacityError>();
    }
}
