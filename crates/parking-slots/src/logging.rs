//! `tracing` subscriber setup for binaries that run slot inference.
//!
//! The library crates emit `log` records and, with the `tracing` feature,
//! one span per row grouping / gap inference / pipeline call. This module
//! installs a `fmt` subscriber that shows both, closing spans with their
//! elapsed time so slow rows stand out.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable read for filter directives, e.g.
/// `PARKING_SLOTS_LOG=parking_slots_infer=trace`.
pub const LOG_ENV: &str = "PARKING_SLOTS_LOG";

/// Used when [`LOG_ENV`] is unset or unparsable: this workspace at `info`,
/// everything else at `warn`.
pub const DEFAULT_DIRECTIVES: &str =
    "warn,parking_slots=info,parking_slots_infer=info,empty_slots=info";

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install a global subscriber (plain text with uptime, or flattened JSON
/// lines) and forward `log` records into it.
///
/// Fails if another subscriber is already installed.
pub fn init_tracing_with_log(json: bool) -> Result<(), TryInitError> {
    let builder = fmt()
        .with_env_filter(filter_from_env())
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);
    if json {
        builder.json().flatten_event(true).finish().try_init()?;
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()?;
    }
    // A `log` bridge may already be installed by the host binary.
    let _ = tracing_log::LogTracer::init();
    Ok(())
}
