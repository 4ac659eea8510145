//! Core error types for the wallet converter.

use ethwallet_market_data::{MarketDataError, UnknownCurrency};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for conversion and presentation logic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Whether the failure means the price source was unreachable.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Error::MarketData(e) => e.is_connectivity(),
            _ => false,
        }
    }
}

impl From<UnknownCurrency> for Error {
    fn from(err: UnknownCurrency) -> Self {
        Error::UnsupportedCurrency(err.0)
    }
}
