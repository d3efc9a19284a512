//! # hookchain-logging
//!
//! Structured logging for hookchain hosts.
//!
//! The hook registry only emits `tracing` events; installing a subscriber is
//! the host's job. This crate provides:
//! - [`init_subscriber`] for a compact stderr subscriber with an `EnvFilter`
//! - [`init_from_settings`] to drive it from [`LoggingSettings`]
//! - [`capture_logs`] for asserting on emitted events in tests

#![deny(unsafe_code)]

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

use hookchain_settings::LoggingSettings;

/// Install a compact stderr subscriber filtered at `level`.
///
/// A `RUST_LOG` directive replaces `level` entirely. Only the first call in a
/// process installs anything.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // a host that already installed its own subscriber keeps it
    let _ = subscriber.try_init();
}

/// Initialize the global subscriber from the `logging` settings section.
pub fn init_from_settings(settings: &LoggingSettings) {
    init_subscriber(&settings.level);
}
