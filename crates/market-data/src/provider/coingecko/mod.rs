//! CoinGecko provider for ETH spot prices.
//!
//! Uses the public simple-price endpoint:
//!
//! ```text
//! GET /api/v3/simple/price?ids=ethereum&vs_currencies=usd
//! {"ethereum": {"usd": 1523.41}}
//! ```
//!
//! No API key is needed for the public tier.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;

use super::{build_client, get_json, DEFAULT_REQUEST_TIMEOUT};
use crate::errors::MarketDataError;
use crate::models::{decimal_from_json, Currency, SpotPrice};
use crate::provider::SpotPriceProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

/// Public API host
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

/// CoinGecko coin id for ether
const COIN_ID: &str = "ethereum";

/// CoinGecko spot price provider.
///
/// # Example
///
/// ```ignore
/// use ethwallet_market_data::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new();
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Create a provider against the public API with the default timeout.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a provider against a custom host (proxy, mirror, test server).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: build_client(timeout),
            base_url,
        }
    }

    fn price_url(&self, currency: Currency) -> String {
        format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies={}",
            self.base_url,
            COIN_ID,
            currency.api_code()
        )
    }

    /// Extract the price for `currency` from a simple-price response body.
    fn parse_price(body: &Value, currency: Currency) -> Result<Decimal, MarketDataError> {
        let code = currency.api_code();
        let prices = body
            .get(COIN_ID)
            .ok_or_else(|| MarketDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("missing '{}' object", COIN_ID),
            })?;

        let raw = prices
            .get(&code)
            .ok_or_else(|| MarketDataError::SymbolNotFound(code.clone()))?;

        decimal_from_json(raw).ok_or_else(|| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("price for '{}' is not a number: {}", code, raw),
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpotPriceProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_spot_price(&self, currency: Currency) -> Result<SpotPrice, MarketDataError> {
        let url = self.price_url(currency);
        debug!("Fetching ETH price in {} from {}", currency, PROVIDER_ID);

        let body = get_json(&self.client, PROVIDER_ID, &url).await?;
        let price = Self::parse_price(&body, currency)?;

        Ok(SpotPrice::new(currency, price, PROVIDER_ID))
    }
}
