//! Operational log file setup.
//!
//! The importer writes its statement log next to the dump files: every DDL
//! statement at info, every caught error at warning, per-record detail at
//! debug. The subscriber is installed once at startup; components emit
//! through the `tracing` macros and tests can swap in scoped subscribers.

use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Installs a file-writing subscriber for the whole process.
///
/// The file is opened in append mode so successive runs accumulate in one
/// log. The default level is `info`; `RUST_LOG` overrides it (e.g.
/// `RUST_LOG=debug` to record per-record insert detail).
pub fn init(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create log directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)
        .map_err(|err| format!("Failed to open log file '{}': {err}", file_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(log_file)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|err| format!("Failed to initialize logging: {err}"))
}
