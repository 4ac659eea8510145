//! Decimal arithmetic behind the conversion use cases.
//!
//! Results are rounded half-up to [`DISPLAY_DECIMAL_PRECISION`] digits and
//! normalized, so `0.500` becomes `0.5` and `5.000` becomes `5`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, GAS_TO_ETH_DIVISOR, TRANSFER_GAS_UNITS};
use crate::errors::{Error, Result};

/// Rounds half away from zero to display precision and strips trailing zeros.
pub fn round_for_display(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        )
        .normalize()
}

/// ETH bought by `fiat_amount` at `price` per ETH.
pub fn fiat_to_crypto(fiat_amount: Decimal, price: Decimal) -> Result<Decimal> {
    if price.is_zero() {
        return Err(Error::Conversion("ETH price is zero".to_string()));
    }
    let eth = fiat_amount
        .checked_div(price)
        .ok_or_else(|| Error::Conversion(format!("{} / {} overflows", fiat_amount, price)))?;
    Ok(round_for_display(eth))
}

/// Fiat value of `eth_amount` at `price` per ETH.
pub fn crypto_to_fiat(eth_amount: Decimal, price: Decimal) -> Result<Decimal> {
    let fiat = eth_amount
        .checked_mul(price)
        .ok_or_else(|| Error::Conversion(format!("{} * {} overflows", eth_amount, price)))?;
    Ok(round_for_display(fiat))
}

/// Fee of a plain transfer, in ETH, for a gas price in gwei.
pub fn gas_fee_in_crypto(gas_price: Decimal) -> Result<Decimal> {
    let fee = gas_price
        .checked_mul(Decimal::from(TRANSFER_GAS_UNITS))
        .and_then(|total| total.checked_div(Decimal::from(GAS_TO_ETH_DIVISOR)))
        .ok_or_else(|| Error::Conversion(format!("gas price {} overflows", gas_price)))?;
    Ok(round_for_display(fee))
}
