//! Flat-file persistence: conversion history, usage statistics, the
//! precision audit log and the error log.
//!
//! Every call opens, writes and closes its file within the call. There is no
//! locking; concurrent writers from several processes are not supported.

pub mod error_log;
pub mod history;
pub mod precision_log;
pub mod usage;

pub use error_log::{ErrorLog, ErrorLogEntry};
pub use history::{ConversionRecord, HistoryStore};
pub use precision_log::{PrecisionLogEntry, PrecisionLogger};
pub use usage::{UsagePairCount, UsageTracker};

use std::path::{Path, PathBuf};

pub const HISTORY_FILE: &str = "history.txt";
pub const ERROR_LOG_FILE: &str = "error_log.txt";
pub const USER_BEHAVIOR_FILE: &str = "user_behavior.txt";
pub const PRECISION_LOG_FILE: &str = "precision_log.txt";

/// Locations of the four artifacts inside one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub history: PathBuf,
    pub errors: PathBuf,
    pub usage: PathBuf,
    pub precision: PathBuf,
}

impl DataFiles {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            history: dir.join(HISTORY_FILE),
            errors: dir.join(ERROR_LOG_FILE),
            usage: dir.join(USER_BEHAVIOR_FILE),
            precision: dir.join(PRECISION_LOG_FILE),
        }
    }
}
