//! Shared helpers for framediff's integration tests.
//!
//! - [`builders::ArtifactBuilder`] writes metadata dumps in ffmpeg's format.
//! - [`fake_tool::FakeTool`] installs a scripted stand-in for ffmpeg.

pub mod builders;
pub mod fake_tool;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests, once per test binary.
///
/// Output goes through `with_test_writer()`, so the harness only shows it
/// for failing tests (or with `-- --nocapture`). Defaults to debug events
/// from framediff itself; override with e.g. `RUST_LOG=trace cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,framediff=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if `f` has not finished after 5 seconds.
///
/// Guards every test that runs a child process, so a stuck drain or a
/// missed kill shows up as a failure instead of a hang.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}
