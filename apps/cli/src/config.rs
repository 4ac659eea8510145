use std::time::Duration;

use ethwallet_market_data::provider::{coingecko, etherscan};
use ethwallet_market_data::DEFAULT_REQUEST_TIMEOUT;

pub struct Config {
    pub coingecko_url: String,
    pub etherscan_url: String,
    pub etherscan_api_key: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let coingecko_url = std::env::var("ETHWALLET_COINGECKO_URL")
            .unwrap_or_else(|_| coingecko::DEFAULT_BASE_URL.to_string());
        let etherscan_url = std::env::var("ETHWALLET_ETHERSCAN_URL")
            .unwrap_or_else(|_| etherscan::DEFAULT_BASE_URL.to_string());
        let etherscan_api_key = std::env::var("ETHWALLET_ETHERSCAN_API_KEY").unwrap_or_default();
        let request_timeout =
            parse_request_timeout(std::env::var("ETHWALLET_REQUEST_TIMEOUT_MS").ok().as_deref());
        Self {
            coingecko_url,
            etherscan_url,
            etherscan_api_key,
            request_timeout,
        }
    }
}

/// Reads a timeout in milliseconds. Unparsable or zero values fall back to
/// the default with a warning.
fn parse_request_timeout(raw: Option<&str>) -> Duration {
    let Some(raw) = raw else {
        return DEFAULT_REQUEST_TIMEOUT;
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            tracing::warn!(
                "ETHWALLET_REQUEST_TIMEOUT_MS must be positive, using {:?}",
                DEFAULT_REQUEST_TIMEOUT
            );
            DEFAULT_REQUEST_TIMEOUT
        }
        Ok(ms) => Duration::from_millis(ms),
        Err(e) => {
            tracing::warn!(
                "Invalid ETHWALLET_REQUEST_TIMEOUT_MS '{}' ({}), using {:?}",
                raw,
                e,
                DEFAULT_REQUEST_TIMEOUT
            );
            DEFAULT_REQUEST_TIMEOUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_defaults_when_unset() {
        assert_eq!(parse_request_timeout(None), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_request_timeout_reads_milliseconds() {
        assert_eq!(parse_request_timeout(Some("1500")), Duration::from_millis(1500));
        assert_eq!(parse_request_timeout(Some(" 250 ")), Duration::from_millis(250));
    }

    #[test]
    fn test_request_timeout_rejects_zero_and_garbage() {
        assert_eq!(parse_request_timeout(Some("0")), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(parse_request_timeout(Some("30s")), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(parse_request_timeout(Some("-5")), DEFAULT_REQUEST_TIMEOUT);
    }
}
