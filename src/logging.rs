use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::stderr_buffer::BufferedStderr;

/// Default filter when `RUST_LOG` is unset
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    format!("warn,pellegrino_esg={}", level)
}

/// Install the global subscriber: formatted events to stderr, held back
/// while the dashboard owns the terminal.
///
/// `RUST_LOG` overrides the default level. Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let stderr_layer = fmt::layer()
        .with_target(verbose)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(BufferedStderr)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
