// Tracing setup for the binary
//
// Diagnostics go to stderr so they never interleave with shell output on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber
///
/// Reads `RUST_LOG`; defaults to `warn` when unset or invalid.
///
/// ```bash
/// RUST_LOG=tasklist=debug tasklist shell
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
