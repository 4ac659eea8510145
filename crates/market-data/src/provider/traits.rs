//! Provider trait definitions.
//!
//! Two layers:
//! - [`SpotPriceProvider`] and [`GasOracleProvider`] are implemented by the
//!   concrete HTTP providers, one concern each.
//! - [`PriceSource`] is what the conversion logic consumes. It is the pair of
//!   questions the wallet asks: "what is one ETH worth in X" and "what is the
//!   fast gas price right now".

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::{Currency, GasOracleReading, SpotPrice};

/// Source of ETH spot prices.
#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the price of one ETH in `currency`.
    async fn get_spot_price(&self, currency: Currency) -> Result<SpotPrice, MarketDataError>;
}

/// Source of network fee estimates.
#[async_trait]
pub trait GasOracleProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the current gas oracle reading.
    async fn get_gas_oracle(&self) -> Result<GasOracleReading, MarketDataError>;
}

/// Live price data consumed by the conversion use cases.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use ethwallet_market_data::{Currency, MarketDataError, PriceSource};
/// use rust_decimal::Decimal;
///
/// struct FixedPrices;
///
/// #[async_trait]
/// impl PriceSource for FixedPrices {
///     async fn price_of(&self, _currency: Currency) -> Result<Decimal, MarketDataError> {
///         Ok(Decimal::from(1500))
///     }
///
///     async fn gas_fee(&self) -> Result<Decimal, MarketDataError> {
///         Ok(Decimal::from(12))
///     }
/// }
/// ```
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current price of one crypto unit in `currency`.
    async fn price_of(&self, currency: Currency) -> Result<Decimal, MarketDataError>;

    /// Current fast gas price, in gwei.
    async fn gas_fee(&self) -> Result<Decimal, MarketDataError>;
}
