use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// Price of one ETH in a fiat currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotPrice {
    pub currency: Currency,

    /// Price of one crypto unit
    pub price: Decimal,

    /// Provider that produced the price (COINGECKO, ...)
    pub source: String,
}

impl SpotPrice {
    pub fn new(currency: Currency, price: Decimal, source: impl Into<String>) -> Self {
        Self {
            currency,
            price,
            source: source.into(),
        }
    }
}

/// Gas oracle reading, in gwei.
///
/// Only `fast` feeds the fee estimate. The other tiers and the block number
/// are informational; they are logged with each reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GasOracleReading {
    /// Block the estimate was computed at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_block: Option<u64>,

    /// Slow tier, informational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe: Option<Decimal>,

    /// Standard tier, informational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propose: Option<Decimal>,

    /// Fast tier, used for the fee estimate shown to the user
    pub fast: Decimal,

    pub source: String,
}
