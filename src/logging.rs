//! Diagnostics on stderr, quiet unless `RUST_LOG` asks for more.
//!
//! `RUST_LOG=info` reports save-file reads and writes, `RUST_LOG=debug` adds
//! command classification and every skipped save-file line.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    // Keep an already-installed subscriber (e.g. one set by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
