//! Logging init for hosting applications and the test-suite.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,extractdl=debug";

/// Install a `tracing` fmt subscriber writing to stderr.
///
/// The filter is read from `RUST_LOG` and defaults to `info,extractdl=debug`.
/// Every event is written as a single line, so output from concurrent segment
/// units interleaves without corruption.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init() -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .is_ok()
}
