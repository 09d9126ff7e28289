//! Terminal front-end over the conversion session

pub mod convert;
pub mod history;
pub mod rates;
pub mod setup;
pub mod stats;
pub mod ui;
