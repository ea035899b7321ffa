//! Structured logging setup for hosts embedding the breakpoint hook.
//!
//! The library crates only emit `tracing` events; a host calls [`init`] once
//! at startup to see them. Logs go to `<dir>/breakpoints.{date}.log` with
//! daily rotation, keeping 7 files. `RUST_LOG` overrides the default filter.
//!
//! Falls back to stderr if the file appender cannot be created.

use fs_err as fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "breakpoint_hook=info,breakpoint_core=warn";

/// `~/.breakpoints`, or the working directory without a home.
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".breakpoints"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive for as long as file logs should flush; it is
/// `None` on the stderr fallback. Calling this twice is a no-op the second
/// time.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    let _ = fs::create_dir_all(log_dir);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match create_file_appender(log_dir) {
        Ok(file_appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let installed = tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_timer(fmt::time::UtcTime::rfc_3339())
                        .with_ansi(false),
                )
                .try_init()
                .is_ok();
            installed.then_some(guard)
        }
        Err(_) => {
            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_timer(fmt::time::UtcTime::rfc_3339())
                        .with_ansi(true),
                )
                .try_init();
            None
        }
    }
}

fn create_file_appender(
    log_dir: &Path,
) -> Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("breakpoints")
        .filename_suffix("log")
        .max_log_files(7)
        .build(log_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[test]
    fn test_default_log_dir_under_home() {
        let temp = tempdir().unwrap();
        std::env::set_var("HOME", temp.path());
        assert_eq!(default_log_dir(), temp.path().join(".breakpoints"));
    }

    #[test]
    fn test_file_appender_builds_in_existing_dir() {
        let temp = tempdir().unwrap();
        assert!(create_file_appender(temp.path()).is_ok());
    }
}
