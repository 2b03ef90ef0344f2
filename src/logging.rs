//! Diagnostics go to stderr; status lines own stdout.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,image_fetcher=debug"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
