//! Logging utilities for the EcoBin application.
//!
//! Provides a standardized way to initialize the tracing subscriber across
//! binaries and integration tests.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` still takes precedence, so operators can raise the level for a
/// single crate without a redeploy. Safe to call more than once; subsequent
/// calls are no-ops.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("ecobin={}", level).parse().expect("valid directive"));

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
