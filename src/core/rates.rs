//! Static currency table: code, display name and rate per one unit of the
//! base currency (USD).

use crate::core::convert::ConversionError;
use std::collections::HashMap;

const BUILTIN_RATES: [(&str, &str, f64); 17] = [
    ("USD", "US Dollar", 1.0),
    ("EUR", "Euro", 0.85),
    ("GBP", "British Pound", 0.73),
    ("JPY", "Japanese Yen", 155.8),
    ("CAD", "Canadian Dollar", 1.38),
    ("AUD", "Australian Dollar", 0.66),
    ("CHF", "Swiss Franc", 0.80),
    ("CNY", "Chinese Yuan", 7.08),
    ("SEK", "Swedish Krona", 10.6),
    ("NZD", "New Zealand Dollar", 1.51),
    ("MXN", "Mexican Peso", 18.3),
    ("SGD", "Singapore Dollar", 1.37),
    ("HKD", "Hong Kong Dollar", 7.79),
    ("NOK", "Norwegian Krone", 8.50),
    ("KRW", "South Korean Won", 1310.0),
    ("TRY", "Turkish Lira", 42.7),
    ("PHP", "Philippine Peso", 59.1),
];

/// Read-only mapping of currency code to rate and display name.
///
/// Iteration order is the order in which codes were supplied.
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: Vec<(String, f64)>,
    names: HashMap<String, String>,
}

impl RateTable {
    pub fn new<I, S>(rates: I, names: HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.into(), rate))
                .collect(),
            names,
        }
    }

    /// The 17 currencies shipped with the application.
    pub fn builtin() -> Self {
        let names = BUILTIN_RATES
            .iter()
            .map(|(code, name, _)| (code.to_string(), name.to_string()))
            .collect();
        Self::new(
            BUILTIN_RATES.iter().map(|(code, _, rate)| (*code, *rate)),
            names,
        )
    }

    pub fn rate(&self, code: &str) -> Result<f64, ConversionError> {
        self.rates
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, rate)| *rate)
            .ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
    }

    /// Falls back to the code itself when no name is registered.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map_or(code, String::as_str)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.iter().map(|(code, _)| code.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.iter().any(|(c, _)| c == code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::builtin()
    }
}
