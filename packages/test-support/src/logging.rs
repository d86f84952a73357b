//! Test logging bootstrap shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Quiet unless asked: engine debug output is per-visit and floods test logs.
const DEFAULT_FILTER: &str = "warn";

/// Filter directive for test output: `TEST_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
fn directive() -> String {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install a test-writer subscriber once per test binary. Safe to call from
/// every `ctor` hook; later calls are no-ops.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_new(directive()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .without_time()
            .try_init();
    });
}
