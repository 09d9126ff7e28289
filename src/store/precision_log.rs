use super::ErrorLog;
use crate::core::{Clock, PrecisionPolicy, PrecisionReason, format_timestamp};
use anyhow::Result;
use chrono::NaiveDateTime;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionLogEntry {
    pub timestamp: NaiveDateTime,
    pub reason: PrecisionReason,
    pub amount: f64,
    pub from_currency: String,
    pub converted_amount: f64,
    pub to_currency: String,
}

impl fmt::Display for PrecisionLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {:.10} {} -> {:.10} {} | Reason: {}",
            format_timestamp(&self.timestamp),
            self.reason,
            self.amount,
            self.from_currency,
            self.converted_amount,
            self.to_currency,
            self.reason
        )
    }
}

/// Audit log for large conversions and conversions touching volatile
/// currencies, written with ten decimal places.
pub struct PrecisionLogger {
    path: PathBuf,
    policy: PrecisionPolicy,
    clock: Arc<dyn Clock>,
    errors: ErrorLog,
}

impl PrecisionLogger {
    pub fn new<P: Into<PathBuf>>(
        path: P,
        policy: PrecisionPolicy,
        clock: Arc<dyn Clock>,
        errors: ErrorLog,
    ) -> Self {
        Self {
            path: path.into(),
            policy,
            clock,
            errors,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> &PrecisionPolicy {
        &self.policy
    }

    /// Appends an entry when the policy triggers and returns its reason.
    pub fn maybe_record(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        converted: f64,
    ) -> Option<PrecisionReason> {
        let reason = self.policy.reason(amount, from, to)?;
        let entry = PrecisionLogEntry {
            timestamp: self.clock.now(),
            reason,
            amount,
            from_currency: from.to_string(),
            converted_amount: converted,
            to_currency: to.to_string(),
        };

        match self.append(&entry) {
            Ok(()) => debug!(%reason, from, to, "Precision RECORD"),
            Err(e) => self.errors.record(
                "PRECISION_LOG",
                &format!("Error saving precision conversion: {e}"),
            ),
        }
        Some(reason)
    }

    fn append(&self, entry: &PrecisionLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{entry}")?;
        Ok(())
    }
}
