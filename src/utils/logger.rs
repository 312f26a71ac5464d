//! Process-wide `tracing` subscriber setup.

use std::env;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Maps a `LOGLEVEL` value to a [`Level`], case-insensitively.
///
/// Unknown values fall back to `INFO`.
#[must_use]
pub fn parse_level(value: &str) -> Level {
    match value.to_uppercase().as_str() {
        "DEBUG" => Level::DEBUG,
        "ERROR" => Level::ERROR,
        "WARN" => Level::WARN,
        "TRACE" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Installs an fmt subscriber filtered by `LOGLEVEL` (default `INFO`).
///
/// Safe to call more than once; only the first call has an effect.  If the
/// host already installed a global subscriber, that one is kept.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for fallible layers.
pub fn setup_logger() -> Result<(), Box<dyn std::error::Error>> {
    INIT.call_once(|| {
        let level = parse_level(&env::var("LOGLEVEL").unwrap_or_else(|_| "INFO".to_string()));

        let installed = tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!("Log level set to: {}", level);
        }
    });

    Ok(())
}
