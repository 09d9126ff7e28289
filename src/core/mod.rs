//! Core conversion logic and application setup

pub mod clock;
pub mod config;
pub mod convert;
pub mod log;
pub mod precision;
pub mod rates;

// Re-export main types for cleaner imports
pub use clock::{Clock, FixedClock, SystemClock, format_timestamp};
pub use convert::{ConversionEngine, ConversionError};
pub use precision::{PrecisionPolicy, PrecisionReason};
pub use rates::RateTable;
