//! Ethwallet Core - conversion logic and presentation state for a
//! fiat/ETH wallet converter.
//!
//! This crate is UI-agnostic. It consumes live prices through the
//! [`PriceSource`](ethwallet_market_data::PriceSource) trait and exposes the
//! screen state as Tokio watch streams.

pub mod constants;
pub mod conversion;
pub mod errors;
pub mod home;
pub mod strings;

// Re-export the presenter and its models
pub use home::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
