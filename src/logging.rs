//! Tracing subscriber setup.
//!
//! The dashboard owns the terminal, so in TUI mode logs go to a file
//! under the user's cache directory. Headless mode logs to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when neither `SEATBELT_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// `<cache dir>/seatbelt/seatbelt.log`
    File,
    Stderr,
}

/// Pick the filter directive: `SEATBELT_LOG`, then `RUST_LOG`, then the default.
pub fn filter_directive(seatbelt_log: Option<String>, rust_log: Option<String>) -> String {
    seatbelt_log
        .or(rust_log)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Path of the log file used in TUI mode.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("seatbelt").join("seatbelt.log"))
}

/// Install the global subscriber.
///
/// Returns the log file path when logging to a file. Failures leave the
/// process without logging rather than aborting it.
pub fn init(target: LogTarget) -> Option<PathBuf> {
    let directive = filter_directive(
        std::env::var("SEATBELT_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
            None
        }
        LogTarget::File => {
            let path = log_file_path()?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).ok()?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .ok()?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .ok()?;
            Some(path)
        }
    }
}
