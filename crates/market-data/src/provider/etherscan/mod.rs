//! Etherscan provider for gas price estimates.
//!
//! Uses the gas tracker oracle:
//!
//! ```text
//! GET /api?module=gastracker&action=gasoracle&apikey=KEY
//! {"status":"1","message":"OK","result":{"LastBlock":"17000000",
//!  "SafeGasPrice":"10","ProposeGasPrice":"11","FastGasPrice":"12"}}
//! ```
//!
//! On failure Etherscan still answers HTTP 200, with `status` "0" and the
//! reason as a plain string in `result`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{build_client, get_json, DEFAULT_REQUEST_TIMEOUT};
use crate::errors::MarketDataError;
use crate::models::{decimal_from_json, GasOracleReading};
use crate::provider::GasOracleProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "ETHERSCAN";

/// Public API host
pub const DEFAULT_BASE_URL: &str = "https://api.etherscan.io";

/// Gas oracle envelope
#[derive(Debug, Deserialize)]
struct GasOracleResponse {
    status: String,
    message: String,
    /// Object on success, error text on failure
    result: Value,
}

/// Etherscan gas oracle provider.
pub struct EtherscanProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EtherscanProvider {
    /// Create a provider against the public API with the default timeout.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a provider against a custom host.
    pub fn with_base_url(base_url: impl Into<String>, api_key: String, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if api_key.is_empty() {
            warn!("Etherscan API key is empty; requests will be heavily rate limited");
        }
        Self {
            client: build_client(timeout),
            base_url,
            api_key,
        }
    }

    fn oracle_url(&self) -> String {
        format!(
            "{}/api?module=gastracker&action=gasoracle&apikey={}",
            self.base_url, self.api_key
        )
    }

    /// Decode a gas oracle response body.
    fn parse_oracle(body: Value) -> Result<GasOracleReading, MarketDataError> {
        let response: GasOracleResponse =
            serde_json::from_value(body).map_err(|e| MarketDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        if response.status != "1" {
            let detail = match &response.result {
                Value::String(s) if !s.is_empty() => s.clone(),
                _ => response.message.clone(),
            };
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: detail,
            });
        }

        let result = &response.result;
        let field = |name: &str| result.get(name).and_then(decimal_from_json);

        let fast = field("FastGasPrice").ok_or_else(|| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: "missing FastGasPrice".to_string(),
        })?;

        let last_block = result
            .get("LastBlock")
            .and_then(|v| match v {
                Value::String(s) => s.parse().ok(),
                Value::Number(n) => n.as_u64(),
                _ => None,
            });

        Ok(GasOracleReading {
            last_block,
            safe: field("SafeGasPrice"),
            propose: field("ProposeGasPrice"),
            fast,
            source: PROVIDER_ID.to_string(),
        })
    }
}

#[async_trait]
impl GasOracleProvider for EtherscanProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_gas_oracle(&self) -> Result<GasOracleReading, MarketDataError> {
        debug!("Fetching gas oracle from {}", PROVIDER_ID);
        let body = get_json(&self.client, PROVIDER_ID, &self.oracle_url()).await?;
        Self::parse_oracle(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_provider_id() {
        let provider = EtherscanProvider::new("key".to_string());
        assert_eq!(provider.id(), "ETHERSCAN");
    }

    #[test]
    fn test_oracle_url_carries_key() {
        let provider = EtherscanProvider::with_base_url(
            "http://localhost:9001",
            "ABC".to_string(),
            DEFAULT_REQUEST_TIMEOUT,
        );
        assert_eq!(
            provider.oracle_url(),
            "http://localhost:9001/api?module=gastracker&action=gasoracle&apikey=ABC"
        );
    }

    #[test]
    fn test_parse_successful_reading() {
        let body = json!({
            "status": "1",
            "message": "OK",
            "result": {
                "LastBlock": "17000000",
                "SafeGasPrice": "10",
                "ProposeGasPrice": "11",
                "FastGasPrice": "12.5"
            }
        });
        let reading = EtherscanProvider::parse_oracle(body).unwrap();
        assert_eq!(reading.fast, dec!(12.5));
        assert_eq!(reading.safe, Some(dec!(10)));
        assert_eq!(reading.propose, Some(dec!(11)));
        assert_eq!(reading.last_block, Some(17_000_000));
        assert_eq!(reading.source, "ETHERSCAN");
    }

    #[test]
    fn test_parse_numeric_fast_price() {
        let body = json!({"status": "1", "message": "OK", "result": {"FastGasPrice": 10}});
        let reading = EtherscanProvider::parse_oracle(body).unwrap();
        assert_eq!(reading.fast, dec!(10));
        assert_eq!(reading.safe, None);
        assert_eq!(reading.last_block, None);
    }

    #[test]
    fn test_error_payload_is_provider_error() {
        let body = json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"});
        let err = EtherscanProvider::parse_oracle(body).unwrap_err();
        match err {
            MarketDataError::ProviderError { provider, message } => {
                assert_eq!(provider, "ETHERSCAN");
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("Expected ProviderError, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fast_price_is_invalid_response() {
        let body = json!({"status": "1", "message": "OK", "result": {"SafeGasPrice": "10"}});
        let err = EtherscanProvider::parse_oracle(body).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidResponse { .. }));
    }

    #[test]
    fn test_malformed_envelope_is_invalid_response() {
        let err = EtherscanProvider::parse_oracle(json!({"result": {}})).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidResponse { .. }));
    }
}
