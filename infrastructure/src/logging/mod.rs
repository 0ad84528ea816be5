//! Logging infrastructure: tracing setup and structured council minutes.
//!
//! - [`init_tracing`] installs the global `tracing` subscriber
//! - [`JsonlMinutesRecorder`] is a JSONL file writer that implements the
//!   [`DebateObserver`](conclave_application::DebateObserver) port

mod minutes_recorder;

pub use minutes_recorder::JsonlMinutesRecorder;

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count: 0=warn, 1=info, 2=debug, 3+=trace.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG`, when set and valid, overrides `verbosity`. Calling this more
/// than once keeps the first subscriber.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
