//! Tracing setup shared by binaries embedding the runtime.

/// Initialize a stderr subscriber honoring `RUST_LOG`, defaulting to INFO.
///
/// Call once at process start; calling again is a no-op failure we swallow
/// so tests can race it safely.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
