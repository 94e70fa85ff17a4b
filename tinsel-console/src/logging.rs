//! This module sets up logging for the console.

use std::path::Path;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};
use tracing_unwrap::ResultExt;

/// The common prefix for the console's log files.
const LOG_PREFIX: &str = "console.log";

/// Initialise a subscriber for tracing to log to `stderr` and an hourly file in `log_dir`.
///
/// The terminal only gets warnings by default so that it doesn't drown out the prompt, but
/// `RUST_LOG` can override that.
pub fn init_tracing(log_dir: &Path) -> WorkerGuard {
    let (appender, guard) = non_blocking(rolling::hourly(log_dir, LOG_PREFIX));

    let subscriber = tracing_subscriber::registry()
        .with(
            Layer::new()
                .with_writer(appender)
                .with_ansi(false)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::DEBUG.into())
                        .parse_lossy(""),
                ),
        )
        .with(
            Layer::new()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::WARN.into())
                        .from_env_lossy(),
                ),
        );

    tracing::subscriber::set_global_default(subscriber)
        .expect_or_log("Setting the global default for tracing should be okay");

    guard
}
