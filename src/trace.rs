//! Tracing hooks for debugging the queue.
//!
//! Enable with `--features tracing`. Without the feature every macro expands
//! to nothing, so the push/pop paths carry no logging cost.

/// Install a tracing subscriber with thread ids and uptime timestamps.
///
/// Reads `RUST_LOG`, falling back to `dmxp_ioqueue=trace`. Does nothing when
/// the `tracing` feature is disabled.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dmxp_ioqueue=trace"));

    // A second init (e.g. from another test) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_timer(fmt::time::uptime()),
        )
        .with(filter)
        .try_init();
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {}

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! debug_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use debug_noop as debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use warn_noop as warn;
