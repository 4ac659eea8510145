use std::time::Duration;

use ethwallet_market_data::Currency;
use rust_decimal::Decimal;

/// ETH held by the wallet; sends above this are disabled
pub const WALLET_ETH_BALANCE: Decimal = Decimal::TEN;

/// Fractional digits kept in converted amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 3;

/// Gas units consumed by a plain ETH transfer
pub const TRANSFER_GAS_UNITS: u32 = 21_000;

/// Divisor turning `gas price * gas units` into ETH
pub const GAS_TO_ETH_DIVISOR: u64 = 100_000_000;

/// Quiet period before typed input is converted
pub const INPUT_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long the display pipeline keeps running with no subscribers
pub const SHARE_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Currencies shown in the conversion preview list, in display order
pub const PREVIEW_CURRENCIES: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Gbp];

/// Amount text the screen starts with
pub const INITIAL_AMOUNT: &str = "0";
