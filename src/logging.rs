//! Logging init for applications embedding the URL builder.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the caller. These helpers set up a stderr fmt subscriber honouring
//! `RUST_LOG`.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,imgix_url=debug";

/// Initialize logging to stderr with `RUST_LOG` or the default filter.
///
/// Returns Err if a global subscriber is already installed, so callers that
/// may run twice (tests, plugins) don't crash.
pub fn init_logging_stderr() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    init_with_filter(env_filter)
}

/// Initialize logging to stderr with an explicit filter directive, e.g. `"imgix_url=trace"`.
pub fn init_logging_with_filter(directives: &str) -> Result<()> {
    init_with_filter(EnvFilter::new(directives))
}

fn init_with_filter(env_filter: EnvFilter) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))?;
    tracing::debug!("imgix-url logging initialized");
    Ok(())
}
