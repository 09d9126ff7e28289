//! Currency conversion bridged through the base currency.

use crate::core::rates::RateTable;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(f64),

    #[error("Currency '{0}' is not supported")]
    UnknownCurrency(String),

    #[error("Converting {amount} {from} to {to} is out of range")]
    OutOfRange {
        amount: f64,
        from: String,
        to: String,
    },

    #[error("No amount was entered")]
    EmptyInput,

    #[error("Invalid amount '{0}', expected a number")]
    MalformedAmount(String),
}

/// Converts amounts using the rates of a [`RateTable`].
#[derive(Debug, Clone, Default)]
pub struct ConversionEngine {
    rates: RateTable,
}

impl ConversionEngine {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Converts `amount` of `from` into `to`.
    ///
    /// The amount is first divided into the base currency and then multiplied
    /// out into the target, never through a direct cross rate. Converting a
    /// currency into itself therefore goes through the same two steps.
    ///
    /// A result that overflows to infinity or underflows to zero is rejected.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConversionError::InvalidAmount(amount));
        }
        let from_rate = self.rates.rate(from)?;
        let to_rate = self.rates.rate(to)?;

        let amount_in_base = amount / from_rate;
        let converted = amount_in_base * to_rate;
        if !converted.is_finite() || converted <= 0.0 {
            return Err(ConversionError::OutOfRange {
                amount,
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(converted)
    }
}
