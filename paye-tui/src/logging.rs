use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Diagnostics land here; the TUI owns the terminal.
pub const LOG_FILE: &str = "paye.log";

/// Initialise the tracing subscriber. Call once at startup.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs stay quiet.
/// * Appends to [`LOG_FILE`] rather than stdout, which the UI occupies.
pub fn init() -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("cannot open log file '{LOG_FILE}'"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();

    Ok(())
}
