//! File logging. The terminal belongs to the shell or the TUI, so log lines
//! go to `taskbot.log` in the data directory instead.

use std::fs::{self, OpenOptions};
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

pub const LOG_FILE: &str = "taskbot.log";

/// Maps a configured level name to a filter, defaulting to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Starts appending log records to `dir/taskbot.log`.
///
/// Returns a readable error instead of panicking; callers keep running
/// without logs when this fails.
pub fn init_logging(level: &str, dir: &Path) -> Result<(), String> {
    let filter = parse_level(level);
    if filter == LevelFilter::Off {
        return Ok(());
    }

    fs::create_dir_all(dir)
        .map_err(|e| format!("failed to create log directory `{}`: {e}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("failed to open log file `{}`: {e}", path.display()))?;

    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(filter, config, file).map_err(|e| format!("logger already set: {e}"))?;
    log::info!("Logging to {} at level {}", path.display(), filter);
    Ok(())
}
