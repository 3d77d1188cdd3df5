//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (an `EnvFilter`
/// directive such as `info` or `warn,ontochange_model=debug`) applies.
/// Calling this twice keeps the first subscriber.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Report output owns stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
