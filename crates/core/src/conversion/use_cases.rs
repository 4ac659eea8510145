use std::sync::Arc;

use ethwallet_market_data::{Currency, PriceSource};
use rust_decimal::Decimal;

use super::arithmetic::{crypto_to_fiat, fiat_to_crypto, gas_fee_in_crypto};
use crate::errors::Result;

/// How much ETH a fiat amount buys.
///
/// With ETH at $1600, an input of 800 USD yields 800 / 1600 = 0.5 ETH.
#[derive(Clone)]
pub struct CryptoAmountUseCase {
    source: Arc<dyn PriceSource>,
}

impl CryptoAmountUseCase {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    pub async fn execute(&self, currency: Currency, fiat_amount: Decimal) -> Result<Decimal> {
        let price = self.source.price_of(currency).await?;
        fiat_to_crypto(fiat_amount, price)
    }
}

/// Fee of a transfer at the current fast gas price, in ETH.
#[derive(Clone)]
pub struct GasFeeUseCase {
    source: Arc<dyn PriceSource>,
}

impl GasFeeUseCase {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    pub async fn execute(&self) -> Result<Decimal> {
        let gas_price = self.source.gas_fee().await?;
        gas_fee_in_crypto(gas_price)
    }
}

/// Fiat value of an ETH amount, used by the currency preview list.
///
/// Failures come back as a value so that a join over several currencies
/// always completes.
#[derive(Clone)]
pub struct FiatValueUseCase {
    source: Arc<dyn PriceSource>,
}

impl FiatValueUseCase {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    pub async fn execute(&self, currency: Currency, eth_amount: Decimal) -> Result<Decimal> {
        let price = self.source.price_of(currency).await?;
        crypto_to_fiat(eth_amount, price)
    }
}
