use crate::core::{Clock, format_timestamp};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorLogEntry {
    pub timestamp: NaiveDateTime,
    pub error_type: String,
    pub details: String,
}

impl fmt::Display for ErrorLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            format_timestamp(&self.timestamp),
            self.error_type,
            self.details
        )
    }
}

/// Append-only diagnostic log shared by all stores.
///
/// Writing never fails from the caller's point of view: if the file cannot be
/// written the entry goes to stderr instead and is otherwise dropped.
#[derive(Clone)]
pub struct ErrorLog {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl ErrorLog {
    pub fn new<P: Into<PathBuf>>(path: P, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, error_type: &str, details: &str) {
        let entry = ErrorLogEntry {
            timestamp: self.clock.now(),
            error_type: error_type.to_string(),
            details: details.to_string(),
        };
        debug!(%error_type, %details, "Recording error");
        if let Err(e) = self.append(&entry) {
            warn!(error = %e, entry = %entry, "Error logging error");
            eprintln!("{}", fallback_message(&entry, &e));
        }
    }

    fn append(&self, entry: &ErrorLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        writeln!(file, "{entry}")?;
        Ok(())
    }
}

/// Console line used when the log file itself cannot be written.
fn fallback_message(entry: &ErrorLogEntry, cause: &anyhow::Error) -> String {
    format!("Error logging error: {cause:#} (entry: {entry})")
}
