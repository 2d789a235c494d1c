use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "portfolio_tracker=info,portfolio_tracker_core=info";

pub(crate) fn init_logging() {
    // RUST_LOG wins; otherwise info for our own crates only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
