use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the stderr log subscriber.
///
/// Without `-v` flags the level comes from `RUST_LOG`, falling back to `warn`.
/// Each `-v` raises it one step (`info`, then `debug`) and overrides `RUST_LOG`.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
