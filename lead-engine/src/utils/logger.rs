//! Logging Infrastructure
//!
//! fmt subscriber on stdout, or daily rolling files when a log directory
//! is configured and exists.

use std::path::Path;

const LOG_FILE_PREFIX: &str = "lead-engine";

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = parse_level(log_level.unwrap_or("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, LOG_FILE_PREFIX);
            // try_init: 测试中可能已有全局 subscriber
            let _ = subscriber.with_writer(file_appender).try_init();
            return;
        }
        eprintln!("Log directory {dir} does not exist, logging to stdout");
    }

    let _ = subscriber.try_init();
}

/// `"debug"` → DEBUG; anything unparseable falls back to INFO
pub fn parse_level(level: &str) -> tracing::Level {
    level.parse().unwrap_or(tracing::Level::INFO)
}
