//! Fiat/ETH conversion.
//!
//! Pure decimal arithmetic lives in [`arithmetic`]; the use cases pair it with
//! a live [`PriceSource`](ethwallet_market_data::PriceSource).

pub mod arithmetic;
mod use_cases;

pub use arithmetic::{crypto_to_fiat, fiat_to_crypto, gas_fee_in_crypto, round_for_display};
pub use use_cases::{CryptoAmountUseCase, FiatValueUseCase, GasFeeUseCase};
