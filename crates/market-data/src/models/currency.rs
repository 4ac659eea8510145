use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fiat currencies the wallet can quote ETH in.
///
/// The declaration order is the order used by currency pickers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    /// Every supported currency, in picker order.
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Gbp];

    /// ISO 4217 code, e.g. `"USD"`.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    /// Display glyph shown next to amounts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::Eur => "Euros",
            Currency::Usd => "Dollars",
            Currency::Gbp => "Pounds",
        }
    }

    /// Asset name of the flag icon the UI should render.
    pub fn icon(&self) -> &'static str {
        match self {
            Currency::Eur => "flag_eur",
            Currency::Usd => "flag_usd",
            Currency::Gbp => "flag_gbp",
        }
    }

    /// Lowercase code as price APIs expect it (`"usd"`).
    pub fn api_code(&self) -> String {
        self.code().to_ascii_lowercase()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a currency code is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownCurrency(code.to_string()))
    }
}
