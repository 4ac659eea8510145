//! Price provider abstractions and implementations.
//!
//! This module contains:
//! - The provider traits (`SpotPriceProvider`, `GasOracleProvider`, `PriceSource`)
//! - Concrete HTTP providers (CoinGecko for prices, Etherscan for gas)
//! - `LivePriceSource`, which combines one of each behind `PriceSource`

mod live;
mod traits;

pub mod coingecko;
pub mod etherscan;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::errors::MarketDataError;

// Re-exports
pub use live::LivePriceSource;
pub use traits::{GasOracleProvider, PriceSource, SpotPriceProvider};

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP client shared by a provider's requests.
fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Sends a GET request and decodes a JSON body, classifying failures.
async fn get_json(
    client: &Client,
    provider: &'static str,
    url: &str,
) -> Result<serde_json::Value, MarketDataError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MarketDataError::from_transport(provider, e))?;

    let response = check_status(provider, response)?;

    response
        .json()
        .await
        .map_err(|e| MarketDataError::from_body(provider, e))
}

fn check_status(provider: &'static str, response: Response) -> Result<Response, MarketDataError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            provider: provider.to_string(),
        });
    }
    if !status.is_success() {
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("HTTP {}", status),
        });
    }
    Ok(response)
}
