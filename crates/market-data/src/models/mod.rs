//! Market data models
//!
//! - `currency` - Supported fiat currencies (Currency)
//! - `quote` - Provider readings (SpotPrice, GasOracleReading)
//! - `decimal` - Lossless JSON to Decimal parsing

mod currency;
mod decimal;
mod quote;

pub use currency::{Currency, UnknownCurrency};
pub use decimal::decimal_from_json;
pub use quote::{GasOracleReading, SpotPrice};
