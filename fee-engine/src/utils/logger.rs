//! Logging Infrastructure
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! With a log directory, application logs are also written to daily rolling
//! files (`gps-calc.YYYY-MM-DD`) and files older than [`LOG_RETENTION_DAYS`]
//! are removed at startup.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Daily log files kept on disk
pub const LOG_RETENTION_DAYS: i64 = 14;

const LOG_FILE_PREFIX: &str = "gps-calc";

/// Initialize the logging system
///
/// `RUST_LOG` wins over `level` when set.
///
/// # Examples
/// ```no_run
/// // Console only
/// fee_engine::utils::logger::init_logger_with_file("debug", false, None)?;
///
/// // Console + daily files
/// fee_engine::utils::logger::init_logger_with_file("info", true, Some("./.gps-calc/logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;
            if let Err(e) = cleanup_old_logs(log_dir) {
                eprintln!("Failed to clean old logs in {}: {e}", log_dir.display());
            }

            let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(appender))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Delete `gps-calc.YYYY-MM-DD` files older than [`LOG_RETENTION_DAYS`]
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(LOG_RETENTION_DAYS);
    let prefix = format!("{LOG_FILE_PREFIX}.");
    let mut removed = 0;

    if !log_dir.exists() {
        return Ok(removed);
    }

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name.strip_prefix(&prefix)
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }

    Ok(removed)
}
