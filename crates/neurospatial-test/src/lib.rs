//! neurospatial-test - Regression test framework for the neurospatial engine
//!
//! Every regression test drives a [`RegParams`], records numbered checks,
//! and asserts on [`RegParams::cleanup`] at the end:
//!
//! ```ignore
//! use neurospatial_test::RegParams;
//!
//! let mut rp = RegParams::new("neighbor");
//! rp.compare_values(1.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: "compare" (default) or "display"; display mode also
//!   dumps intermediate maps to `tests/regout`
//! - `RUST_LOG`: filter for [`init_tracing`]

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode, render_map};

/// Initialize a tracing subscriber for tests.
///
/// Safe to call multiple times; only the first call installs it.
/// Respects `RUST_LOG`, defaulting to "info".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // neurospatial-test is at crates/neurospatial-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
