//! Rules deciding which conversions deserve a high-precision audit entry.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PRECISION_THRESHOLD: f64 = 10_000.0;

/// Includes ARS and VES even though the rate table does not; only membership
/// is ever checked.
pub const DEFAULT_VOLATILE_CURRENCIES: [&str; 6] = ["TRY", "MXN", "PHP", "KRW", "ARS", "VES"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionReason {
    LargeAmount,
    VolatileCurrency,
}

impl PrecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrecisionReason::LargeAmount => "LARGE_AMOUNT",
            PrecisionReason::VolatileCurrency => "VOLATILE_CURRENCY",
        }
    }
}

impl fmt::Display for PrecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold and volatile set, shared by the trigger check and the reason.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PrecisionPolicy {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_volatile_currencies")]
    pub volatile_currencies: Vec<String>,
}

fn default_threshold() -> f64 {
    DEFAULT_PRECISION_THRESHOLD
}

fn default_volatile_currencies() -> Vec<String> {
    DEFAULT_VOLATILE_CURRENCIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            volatile_currencies: default_volatile_currencies(),
        }
    }
}

impl PrecisionPolicy {
    pub fn is_large(&self, amount: f64) -> bool {
        amount > self.threshold
    }

    pub fn is_volatile(&self, from: &str, to: &str) -> bool {
        self.volatile_currencies
            .iter()
            .any(|code| code == from || code == to)
    }

    /// Returns the reason to log, or `None` when neither trigger holds.
    ///
    /// A large amount always reports `LARGE_AMOUNT`, even when a volatile
    /// currency is involved as well.
    pub fn reason(&self, amount: f64, from: &str, to: &str) -> Option<PrecisionReason> {
        if self.is_large(amount) {
            Some(PrecisionReason::LargeAmount)
        } else if self.is_volatile(from, to) {
            Some(PrecisionReason::VolatileCurrency)
        } else {
            None
        }
    }
}
