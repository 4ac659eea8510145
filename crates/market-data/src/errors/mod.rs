//! Error types for the market data crate.
//!
//! [`MarketDataError`] covers every way a provider call can fail. Callers that
//! only need to tell the user "check your connection" versus "something went
//! wrong" use [`MarketDataError::is_connectivity`].

use thiserror::Error;

/// Errors that can occur while talking to a price provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider answered but had no price for the requested symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request did not complete within the client timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider returned an error status or an error payload.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body could not be understood.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        provider: String,
        message: String,
    },

    /// The provider could not be reached.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Maps a transport failure from `reqwest` to the matching variant.
    ///
    /// Timeouts and connection failures are kept apart from HTTP-level
    /// failures so the UI can show a connectivity message for them.
    pub fn from_transport(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else if err.is_connect() || err.is_request() {
            Self::Network(err)
        } else {
            Self::ProviderError {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Maps a failure while reading or decoding a response body.
    ///
    /// A timeout or a dropped connection mid-body is still a transport
    /// failure. Only a body that arrived but did not decode is a bad payload.
    pub fn from_body(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else if err.is_connect() || err.is_body() {
            Self::Network(err)
        } else {
            Self::InvalidResponse {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Whether the failure means the provider was unreachable.
    ///
    /// # Examples
    ///
    /// ```
    /// use ethwallet_market_data::errors::MarketDataError;
    ///
    /// let error = MarketDataError::Timeout { provider: "COINGECKO".to_string() };
    /// assert!(error.is_connectivity());
    ///
    /// let error = MarketDataError::SymbolNotFound("jpy".to_string());
    /// assert!(!error.is_connectivity());
    /// ```
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_connectivity() {
        let error = MarketDataError::Timeout {
            provider: "ETHERSCAN".to_string(),
        };
        assert!(error.is_connectivity());
    }

    #[test]
    fn test_provider_failures_are_not_connectivity() {
        let errors = [
            MarketDataError::SymbolNotFound("jpy".to_string()),
            MarketDataError::RateLimited {
                provider: "COINGECKO".to_string(),
            },
            MarketDataError::ProviderError {
                provider: "ETHERSCAN".to_string(),
                message: "Invalid API Key".to_string(),
            },
            MarketDataError::InvalidResponse {
                provider: "COINGECKO".to_string(),
                message: "missing field".to_string(),
            },
        ];
        for error in errors {
            assert!(!error.is_connectivity(), "{error} should not be connectivity");
        }
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("jpy".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: jpy");

        let error = MarketDataError::RateLimited {
            provider: "COINGECKO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: COINGECKO");

        let error = MarketDataError::ProviderError {
            provider: "ETHERSCAN".to_string(),
            message: "NOTOK".to_string(),
        };
        assert_eq!(format!("{}", error), "Provider error: ETHERSCAN - NOTOK");
    }
}
