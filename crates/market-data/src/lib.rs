//! Ethwallet Market Data Crate
//!
//! Live price data for the wallet converter: what one ETH is worth in a fiat
//! currency, and what the network currently charges for a transaction.
//!
//! # Architecture
//!
//! ```text
//! +--------------------+     +---------------------+
//! | CoinGeckoProvider  |     | EtherscanProvider   |
//! | (SpotPriceProvider)|     | (GasOracleProvider) |
//! +--------------------+     +---------------------+
//!            \                        /
//!             v                      v
//!            +------------------------+
//!            |    LivePriceSource     |
//!            |     (PriceSource)      |
//!            +------------------------+
//!                        |
//!                        v
//!               conversion use cases
//! ```
//!
//! # Core Types
//!
//! - [`Currency`] - Supported fiat currencies
//! - [`PriceSource`] - What the conversion logic consumes
//! - [`MarketDataError`] - Provider failures, with connectivity classification

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{decimal_from_json, Currency, GasOracleReading, SpotPrice, UnknownCurrency};

pub use provider::coingecko::CoinGeckoProvider;
pub use provider::etherscan::EtherscanProvider;
pub use provider::{
    GasOracleProvider, LivePriceSource, PriceSource, SpotPriceProvider, DEFAULT_REQUEST_TIMEOUT,
};
