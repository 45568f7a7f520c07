//! Logging setup.
//!
//! Library code only emits `tracing` events. Natively they go to a fmt
//! subscriber on stderr filtered by `RUST_LOG`; in the browser the `log`
//! bridge forwards them to the devtools console.

/// Install the stderr subscriber. Defaults to `info` when `RUST_LOG` is unset.
/// A second call is a no-op.
#[cfg(feature = "native")]
pub fn init_native() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Route panics and log records to the browser console.
#[cfg(feature = "hydrate")]
pub fn init_browser() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}
