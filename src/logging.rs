//! Tracing subscriber setup for hosts and tests.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a formatting subscriber filtered by `RUST_LOG`, defaulting to `info`.
/// Returns false when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).try_init().is_ok()
}
