use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, e.g. `tsesh=debug`.
pub const LOG_ENV: &str = "TSESH_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Logs to stderr, filtered by [`LOG_ENV`].
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
