//! Tracing subscriber installation for hosts of the users core.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global `fmt` subscriber filtered by `RUST_LOG`.
///
/// With `json` set, events are written as JSON lines. A subscriber that is
/// already installed is left in place.
pub fn init(json: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        warn!(error = %e, "tracing init failed");
    }
}
