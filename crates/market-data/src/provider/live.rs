use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::Currency;

use super::traits::{GasOracleProvider, PriceSource, SpotPriceProvider};

/// `PriceSource` backed by one spot price provider and one gas oracle.
#[derive(Clone)]
pub struct LivePriceSource {
    prices: Arc<dyn SpotPriceProvider>,
    gas: Arc<dyn GasOracleProvider>,
}

impl LivePriceSource {
    pub fn new(prices: Arc<dyn SpotPriceProvider>, gas: Arc<dyn GasOracleProvider>) -> Self {
        Self { prices, gas }
    }
}

#[async_trait]
impl PriceSource for LivePriceSource {
    async fn price_of(&self, currency: Currency) -> Result<Decimal, MarketDataError> {
        let spot = self.prices.get_spot_price(currency).await?;
        debug!("{} ETH price in {}: {}", spot.source, currency, spot.price);
        Ok(spot.price)
    }

    async fn gas_fee(&self) -> Result<Decimal, MarketDataError> {
        let reading = self.gas.get_gas_oracle().await?;
        debug!(
            "{} gas oracle at block {:?}: safe {:?}, propose {:?}, fast {}",
            reading.source, reading.last_block, reading.safe, reading.propose, reading.fast
        );
        Ok(reading.fast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GasOracleReading, SpotPrice};
    use rust_decimal_macros::dec;

    struct StubPrices;

    #[async_trait]
    impl SpotPriceProvider for StubPrices {
        fn id(&self) -> &'static str {
            "STUB"
        }

        async fn get_spot_price(&self, currency: Currency) -> Result<SpotPrice, MarketDataError> {
            match currency {
                Currency::Usd => Ok(SpotPrice::new(currency, dec!(1500), "STUB")),
                other => Err(MarketDataError::SymbolNotFound(other.api_code())),
            }
        }
    }

    struct StubGas;

    #[async_trait]
    impl GasOracleProvider for StubGas {
        fn id(&self) -> &'static str {
            "STUB"
        }

        async fn get_gas_oracle(&self) -> Result<GasOracleReading, MarketDataError> {
            Ok(GasOracleReading {
                last_block: None,
                safe: Some(dec!(8)),
                propose: Some(dec!(10)),
                fast: dec!(12),
                source: "STUB".to_string(),
            })
        }
    }

    fn source() -> LivePriceSource {
        LivePriceSource::new(Arc::new(StubPrices), Arc::new(StubGas))
    }

    #[tokio::test]
    async fn test_price_of_returns_spot_price() {
        assert_eq!(source().price_of(Currency::Usd).await.unwrap(), dec!(1500));
    }

    #[tokio::test]
    async fn test_price_of_propagates_provider_error() {
        let err = source().price_of(Currency::Eur).await.unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn test_gas_fee_uses_fast_tier() {
        assert_eq!(source().gas_fee().await.unwrap(), dec!(12));
    }
}
