//! Test support utilities shared by the scorekeeper integration tests.
//!
//! Provides the unified test logging bootstrap, the proptest configuration
//! used by property suites, and unique identifier helpers for building
//! rosters that never collide between test runs.

pub mod logging;
pub mod proptest_prelude;

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use test_support::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate `count` unique display names sharing a prefix.
///
/// Names are distinct even after case-folding, which is what roster
/// validation compares.
pub fn unique_names(prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{prefix} {i} {}", Ulid::new()))
        .collect()
}
