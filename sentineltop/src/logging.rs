//! File-backed tracing setup. Stdout belongs to the TUI, so logs go to a file.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SENTINELTOP_LOG";
pub const LOG_FILE_ENV: &str = "SENTINELTOP_LOG_FILE";

pub fn log_path() -> PathBuf {
    if let Some(p) = std::env::var_os(LOG_FILE_ENV) {
        return PathBuf::from(p);
    }
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sentineltop")
        .join("sentineltop.log")
}

/// Install the global subscriber. Logging is silently disabled if the log
/// file cannot be opened.
pub fn init() {
    let path = log_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
