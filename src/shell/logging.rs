use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber: `RUST_LOG` when set, `info` otherwise, written to stderr
/// so it never interleaves with the terminal's own output. A second call is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
