//! Logging configuration using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Initialize the logging subsystem
///
/// Diagnostics go to stderr so block output on stdout stays clean.
/// Log level is controlled by the `VMGREP_LOG` environment variable.
///
/// # Examples
/// ```bash
/// VMGREP_LOG=debug vmgrep memcheck.log
/// VMGREP_LOG=vmgrep_core=trace vmgrep memcheck.log
/// ```
pub fn init() -> Result<()> {
    // Default to warnings only, allow override via VMGREP_LOG
    let env_filter =
        EnvFilter::try_from_env("VMGREP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|err| Error::logging(err.to_string()))
}
