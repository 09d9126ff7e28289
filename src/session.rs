//! The conversion workflow: one engine plus the stores that record what it
//! does, wired together explicitly.

use crate::core::config::AppConfig;
use crate::core::{Clock, ConversionEngine, ConversionError, PrecisionPolicy, SystemClock};
use crate::store::{
    ConversionRecord, DataFiles, ErrorLog, HistoryStore, PrecisionLogger, UsageTracker,
};
use anyhow::Result;
use std::fs;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ConversionSession {
    engine: ConversionEngine,
    history: HistoryStore,
    usage: UsageTracker,
    precision: PrecisionLogger,
    errors: ErrorLog,
}

impl ConversionSession {
    /// Opens a session on the configured data directory with the built-in
    /// rate table and the system clock.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let data_path = config.default_data_path()?;
        if let Err(e) = fs::create_dir_all(&data_path) {
            warn!(error = %e, path = %data_path.display(), "Could not create data directory");
        }
        info!(path = %data_path.display(), "Opening conversion session");

        Ok(Self::with_files(
            DataFiles::in_dir(&data_path),
            ConversionEngine::default(),
            config.precision.clone(),
            Arc::new(SystemClock),
        ))
    }

    /// Builds a session over explicit files and loads the usage statistics.
    pub fn with_files(
        files: DataFiles,
        engine: ConversionEngine,
        policy: PrecisionPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let errors = ErrorLog::new(files.errors, Arc::clone(&clock));
        let history = HistoryStore::new(files.history, errors.clone());
        let mut usage = UsageTracker::new(files.usage, Arc::clone(&clock), errors.clone());
        let precision = PrecisionLogger::new(files.precision, policy, clock, errors.clone());

        usage.load_all();

        Self {
            engine,
            history,
            usage,
            precision,
            errors,
        }
    }

    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    pub fn precision(&self) -> &PrecisionLogger {
        &self.precision
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    /// Converts and records the result in history, usage statistics and,
    /// when the precision policy triggers, the precision log.
    ///
    /// Validation failures are returned untouched and nothing is recorded.
    pub fn convert(
        &mut self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionRecord, ConversionError> {
        let converted = self.engine.convert(amount, from, to)?;
        let record = ConversionRecord::new(amount, from, to, converted);
        debug!(%record, "Converted");

        self.history.append(&record);
        self.usage.record(from, to);
        self.precision.maybe_record(amount, from, to, converted);

        Ok(record)
    }

    /// Converts an amount typed by the user.
    ///
    /// Commas and whitespace are stripped before parsing. Rejected input is
    /// noted in the error log before the error is returned.
    pub fn convert_input(
        &mut self,
        input: &str,
        from: &str,
        to: &str,
    ) -> Result<ConversionRecord, ConversionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.errors.record(
                "EMPTY_INPUT",
                "User attempted conversion with empty amount",
            );
            return Err(ConversionError::EmptyInput);
        }

        let cleaned: String = trimmed
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let amount: f64 = match cleaned.parse() {
            Ok(amount) => amount,
            Err(_) => {
                self.errors.record(
                    "PARSE_ERROR",
                    &format!("User entered invalid number format: {input}"),
                );
                return Err(ConversionError::MalformedAmount(input.to_string()));
            }
        };

        match self.convert(amount, from, to) {
            Err(e @ ConversionError::InvalidAmount(_)) => {
                self.errors.record(
                    "INVALID_AMOUNT",
                    &format!("User entered non-positive amount: {amount}"),
                );
                Err(e)
            }
            Err(e) => {
                self.errors
                    .record("CONVERSION_ERROR", &format!("Unexpected error: {e}"));
                Err(e)
            }
            ok => ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RateTable;
    use crate::store::test_support::{error_lines, fixed_clock};
    use std::path::Path;
    use tempfile::TempDir;

    fn session_in(dir: &Path) -> ConversionSession {
        ConversionSession::with_files(
            DataFiles::in_dir(dir),
            ConversionEngine::new(RateTable::builtin()),
            PrecisionPolicy::default(),
            fixed_clock(),
        )
    }

    #[test]
    fn test_convert_records_everywhere() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(dir.path());

        let record = session.convert(20_000.0, "USD", "EUR").unwrap();

        assert_eq!(record.converted_amount, 17_000.0);
        assert_eq!(session.history().load_all(), vec![record]);
        assert_eq!(session.usage().snapshot()["USD->EUR"], 1);
        let precision = fs::read_to_string(session.precision().path()).unwrap();
        assert!(precision.contains("| LARGE_AMOUNT |"));
        assert!(error_lines(dir.path()).is_empty());
    }

    #[test]
    fn test_small_conversion_skips_precision_log() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(dir.path());

        session.convert(100.0, "USD", "EUR").unwrap();

        assert!(!session.precision().path().exists());
        assert_eq!(session.history().load_all().len(), 1);
    }

    #[test]
    fn test_rejected_conversion_records_nothing() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(dir.path());

        assert_eq!(
            session.convert(-5.0, "USD", "EUR"),
            Err(ConversionError::InvalidAmount(-5.0))
        );
        assert!(session.history().load_all().is_empty());
        assert!(session.usage().snapshot().is_empty());
        assert!(error_lines(dir.path()).is_empty());
    }

    #[test]
    fn test_convert_input_strips_separators() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(dir.path());

        let record = session.convert_input(" 1,000.50 ", "USD", "USD").unwrap();

        assert_eq!(record.amount, 1000.5);
        assert!(error_lines(dir.path()).is_empty());
    }

    #[test]
    fn test_convert_input_logs_rejections() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(dir.path());

        assert_eq!(
            session.convert_input("   ", "USD", "EUR"),
            Err(ConversionError::EmptyInput)
        );
        assert_eq!(
            session.convert_input(",", "USD", "EUR"),
            Err(ConversionError::EmptyInput)
        );
        assert_eq!(
            session.convert_input("12abc", "USD", "EUR"),
            Err(ConversionError::MalformedAmount("12abc".to_string()))
        );
        assert_eq!(
            session.convert_input("-3", "USD", "EUR"),
            Err(ConversionError::InvalidAmount(-3.0))
        );
        assert_eq!(
            session.convert_input("10", "XXX", "EUR"),
            Err(ConversionError::UnknownCurrency("XXX".to_string()))
        );

        let errors = error_lines(dir.path());
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("| EMPTY_INPUT | User attempted conversion with empty amount"));
        assert!(errors[1].contains("| PARSE_ERROR | User entered invalid number format: 12abc"));
        assert!(errors[2].contains("| INVALID_AMOUNT | User entered non-positive amount: -3"));
        assert!(errors[3].contains("| CONVERSION_ERROR | Unexpected error: Currency 'XXX' is not supported"));
        assert!(session.history().load_all().is_empty());
    }

    #[test]
    fn test_out_of_range_result_records_nothing() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(dir.path());

        let result = session.convert_input("1e308", "USD", "KRW");

        assert!(matches!(result, Err(ConversionError::OutOfRange { .. })));
        assert!(!session.history().path().exists());
        assert!(session.usage().snapshot().is_empty());
        assert!(!session.precision().path().exists());
        let errors = error_lines(dir.path());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("| CONVERSION_ERROR | Unexpected error: Converting"));
    }

    #[test]
    fn test_reopened_session_keeps_usage() {
        let dir = TempDir::new().unwrap();
        {
            let mut session = session_in(dir.path());
            session.convert(10.0, "USD", "EUR").unwrap();
            session.convert(10.0, "USD", "EUR").unwrap();
            session.convert(10.0, "GBP", "JPY").unwrap();
        }

        let mut session = session_in(dir.path());
        assert_eq!(session.usage().snapshot()["USD->EUR"], 2);
        session.convert(10.0, "USD", "EUR").unwrap();
        assert_eq!(session.usage().snapshot()["USD->EUR"], 3);
        assert_eq!(session.history().load_all().len(), 4);
    }

    #[test]
    fn test_custom_policy_is_shared_with_logger() {
        let dir = TempDir::new().unwrap();
        let mut session = ConversionSession::with_files(
            DataFiles::in_dir(dir.path()),
            ConversionEngine::default(),
            PrecisionPolicy {
                threshold: 50.0,
                volatile_currencies: vec![],
            },
            fixed_clock(),
        );

        session.convert(60.0, "USD", "TRY").unwrap();
        session.convert(40.0, "USD", "TRY").unwrap();

        let precision = fs::read_to_string(session.precision().path()).unwrap();
        assert_eq!(precision.lines().count(), 1);
        assert!(precision.contains("60.0000000000 USD"));
    }
}
