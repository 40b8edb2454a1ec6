//! Logging setup shared by the Rendezvous binaries and tests.
//!
//! All crates log through `tracing`; this module installs the subscriber.
//! `RUST_LOG` directives are honoured and the configured level is added on
//! top for the `rendezvous` targets.

use rendezvous_config::LoggingConfig;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// use rendezvous_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber from the `logging` config section.
///
/// An unknown level name falls back to INFO.
pub fn init_from_config(config: &LoggingConfig) {
    init_with_level(parse_level(&config.level).unwrap_or(Level::INFO));
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(level: Level) {
    // Target directives match by prefix, so this covers every rendezvous_* crate.
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("rendezvous={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Parses `trace`, `debug`, `info`, `warn` or `error` (any case).
pub fn parse_level(raw: &str) -> Option<Level> {
    raw.trim().parse::<Level>().ok()
}
