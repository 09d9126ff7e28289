use super::ErrorLog;
use anyhow::{Context, Result, anyhow};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// One completed conversion. Stored as `amount,from,to,converted`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRecord {
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
    pub converted_amount: f64,
}

impl ConversionRecord {
    pub fn new(amount: f64, from: &str, to: &str, converted_amount: f64) -> Self {
        Self {
            amount,
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            converted_amount,
        }
    }
}

// `Display` for f64 never emits thousands separators or exponents, so the
// four comma-separated fields stay intact.
impl fmt::Display for ConversionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.amount, self.from_currency, self.to_currency, self.converted_amount
        )
    }
}

impl FromStr for ConversionRecord {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let [amount, from, to, converted] = parts.as_slice() else {
            return Err(anyhow!("expected 4 fields, found {}", parts.len()));
        };
        Ok(Self {
            amount: amount
                .parse()
                .with_context(|| format!("invalid amount '{amount}'"))?,
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            converted_amount: converted
                .parse()
                .with_context(|| format!("invalid converted amount '{converted}'"))?,
        })
    }
}

/// Append-only conversion history, read back newest first.
pub struct HistoryStore {
    path: PathBuf,
    errors: ErrorLog,
}

impl HistoryStore {
    pub fn new<P: Into<PathBuf>>(path: P, errors: ErrorLog) -> Self {
        Self {
            path: path.into(),
            errors,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &ConversionRecord) {
        let res: Result<()> = (|| {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            writeln!(file, "{record}")?;
            Ok(())
        })();

        match res {
            Ok(()) => debug!(%record, "History APPEND"),
            Err(e) => self
                .errors
                .record("SAVE_HISTORY", &format!("Error saving history: {e}")),
        }
    }

    /// Reads every record, most recently appended first.
    ///
    /// Malformed lines are logged and skipped; a missing file is an empty
    /// history.
    pub fn load_all(&self) -> Vec<ConversionRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file");
                return Vec::new();
            }
            Err(e) => {
                self.errors
                    .record("LOAD_HISTORY_IO", &format!("Error loading history: {e}"));
                return Vec::new();
            }
        };

        let mut records: Vec<ConversionRecord> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match line.parse::<ConversionRecord>() {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(error = %e, line, "Skipping history line");
                    self.errors
                        .record("LOAD_HISTORY_PARSE", &format!("Invalid history line: {line}"));
                    None
                }
            })
            .collect();
        records.reverse();

        debug!(count = records.len(), "History LOAD");
        records
    }

    /// Truncates the history. A missing file is left missing.
    pub fn clear(&self) {
        match OpenOptions::new().write(true).truncate(true).open(&self.path) {
            Ok(_) => debug!("History CLEAR"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => self.errors.record(
                "CLEAR_HISTORY",
                &format!("Error clearing history file: {e}"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{error_lines, error_log_in};
    use tempfile::TempDir;

    fn store_in(dir: &Path) -> HistoryStore {
        HistoryStore::new(dir.join("history.txt"), error_log_in(dir))
    }

    #[test]
    fn test_record_line_format() {
        let record = ConversionRecord::new(1500.5, "USD", "JPY", 233777.9);
        assert_eq!(record.to_string(), "1500.5,USD,JPY,233777.9");

        let large = ConversionRecord::new(12_345_678.0, "USD", "KRW", 16_172_838_180.0);
        assert_eq!(large.to_string(), "12345678,USD,KRW,16172838180");
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_java_style_numbers() {
        let record: ConversionRecord = " 100.0 , USD , EUR , 85.0 ".parse().unwrap();
        assert_eq!(record, ConversionRecord::new(100.0, "USD", "EUR", 85.0));

        let exp: ConversionRecord = "1.2345E7,USD,EUR,1.049325E7".parse().unwrap();
        assert_eq!(exp.amount, 12_345_000.0);
    }

    #[test]
    fn test_load_returns_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = store_in(dir.path());
        let r1 = ConversionRecord::new(1.0, "USD", "EUR", 0.85);
        let r2 = ConversionRecord::new(2.0, "GBP", "JPY", 426.84931506849313);
        let r3 = ConversionRecord::new(3.0, "EUR", "USD", 3.5294117647058822);

        store.append(&r1);
        store.append(&r2);
        store.append(&r3);

        assert_eq!(store.load_all(), vec![r3, r2, r1]);
        assert!(error_lines(dir.path()).is_empty());
    }

    #[test]
    fn test_append_keeps_file_order_oldest_first() {
        let dir = TempDir::new().unwrap();
        let store = store_in(dir.path());
        store.append(&ConversionRecord::new(10.0, "USD", "EUR", 8.5));
        store.append(&ConversionRecord::new(20.0, "USD", "GBP", 14.6));

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "10,USD,EUR,8.5\n20,USD,GBP,14.6\n");
    }

    #[test]
    fn test_missing_file_loads_empty_without_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(dir.path());
        assert!(store.load_all().is_empty());
        assert!(error_lines(dir.path()).is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped_and_logged() {
        let dir = TempDir::new().unwrap();
        let store = store_in(dir.path());
        fs::write(
            store.path(),
            "100.0,USD,EUR,85.0\n100.0,USD\n\nabc,USD,EUR,85.0\n",
        )
        .unwrap();

        assert_eq!(
            store.load_all(),
            vec![ConversionRecord::new(100.0, "USD", "EUR", 85.0)]
        );

        let errors = error_lines(dir.path());
        assert_eq!(errors.len(), 2);
        assert!(errors[0].ends_with("| LOAD_HISTORY_PARSE | Invalid history line: 100.0,USD"));
        assert!(errors[1].ends_with("| LOAD_HISTORY_PARSE | Invalid history line: abc,USD,EUR,85.0"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(dir.path());

        store.clear();
        assert!(!store.path().exists());
        assert!(store.load_all().is_empty());

        store.append(&ConversionRecord::new(5.0, "USD", "CAD", 6.8999999999999995));
        store.clear();
        store.clear();
        assert!(store.path().exists());
        assert!(store.load_all().is_empty());
        assert!(error_lines(dir.path()).is_empty());
    }

    #[test]
    fn test_append_failure_is_logged() {
        let dir = TempDir::new().unwrap();
        // A directory in place of the history file makes the open fail.
        let store = HistoryStore::new(dir.path().to_path_buf(), error_log_in(dir.path()));

        store.append(&ConversionRecord::new(1.0, "USD", "EUR", 0.85));

        let errors = error_lines(dir.path());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("| SAVE_HISTORY | Error saving history:"));
    }

    #[test]
    fn test_unreadable_history_is_logged_and_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().to_path_buf(), error_log_in(dir.path()));

        assert!(store.load_all().is_empty());

        let errors = error_lines(dir.path());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("| LOAD_HISTORY_IO | Error loading history:"));
    }

    #[test]
    fn test_clear_failure_is_logged() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().to_path_buf(), error_log_in(dir.path()));

        store.clear();

        assert!(dir.path().is_dir());
        let errors = error_lines(dir.path());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("| CLEAR_HISTORY | Error clearing history file:"));
    }
}
