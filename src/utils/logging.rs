use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter for a run, before `RUST_LOG` is consulted
pub fn default_level(debug: bool) -> Level {
    if debug { Level::DEBUG } else { Level::WARN }
}

/// Install the diagnostics subscriber
///
/// Diagnostics go to stderr so they never mix with CSV or report output on
/// stdout. `RUST_LOG` takes precedence over `--debug` when set. Calling this
/// more than once is harmless; only the first call installs a subscriber.
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(debug).as_str()));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .try_init();
}
