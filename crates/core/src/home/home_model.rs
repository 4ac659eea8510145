use std::str::FromStr;

use ethwallet_market_data::Currency;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::constants::{PREVIEW_CURRENCIES, WALLET_ETH_BALANCE};

/// Which field the user is typing into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputMode {
    /// The user types a fiat amount; ETH is derived from the live price.
    #[default]
    FiatToCrypto,
    /// The user types ETH directly; no price lookup.
    CryptoOnly,
}

impl InputMode {
    pub fn is_fiat_to_crypto(&self) -> bool {
        *self == InputMode::FiatToCrypto
    }
}

/// Combined snapshot of the input cells, with the amount already sanitized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiInputs {
    pub value: Decimal,
    pub currency: Currency,
    pub input_mode: InputMode,
}

impl UiInputs {
    pub fn new(amount_text: &str, currency: Currency, input_mode: InputMode) -> Self {
        Self {
            value: sanitize_amount(amount_text),
            currency,
            input_mode,
        }
    }
}

/// Parses typed text as a decimal, treating anything unparsable as zero.
/// Scientific notation such as `1e3` is accepted.
pub fn sanitize_amount(text: &str) -> Decimal {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}

/// Whether the wallet can cover `eth_amount`.
pub fn has_sufficient_balance(eth_amount: Decimal) -> bool {
    eth_amount > Decimal::ZERO && eth_amount <= WALLET_ETH_BALANCE
}

/// Everything the converter screen renders.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    /// Amount text exactly as typed
    pub user_input: String,
    pub crypto_amount: Decimal,
    /// Network fee of the transfer, in ETH
    pub gas_fee: Decimal,
    pub currency: Currency,
    pub input_mode: InputMode,
    pub send_enabled: bool,
}

impl DisplayState {
    pub fn new(
        user_input: String,
        crypto_amount: Decimal,
        gas_fee: Decimal,
        currency: Currency,
        input_mode: InputMode,
    ) -> Self {
        Self {
            user_input,
            crypto_amount,
            gas_fee,
            currency,
            input_mode,
            send_enabled: has_sufficient_balance(crypto_amount),
        }
    }
}

/// Load status of one preview entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum PreviewStatus {
    Loading,
    Loaded(Decimal),
    Failed(String),
}

/// One row of the currency preview list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurrencyPreview {
    pub currency: Currency,
    pub status: PreviewStatus,
}

/// Fiat value of an ETH amount across the preview currencies.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewState {
    pub crypto_amount: Decimal,
    pub currencies: Vec<CurrencyPreview>,
    /// Batch that owns this state; writes from older batches are ignored.
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl PreviewState {
    /// All entries loading for `crypto_amount`.
    pub fn loading(crypto_amount: Decimal) -> Self {
        Self::loading_batch(crypto_amount, 0)
    }

    pub(crate) fn loading_batch(crypto_amount: Decimal, generation: u64) -> Self {
        Self {
            crypto_amount,
            currencies: PREVIEW_CURRENCIES
                .into_iter()
                .map(|currency| CurrencyPreview {
                    currency,
                    status: PreviewStatus::Loading,
                })
                .collect(),
            generation,
        }
    }

    pub fn status_of(&self, currency: Currency) -> Option<&PreviewStatus> {
        self.currencies
            .iter()
            .find(|entry| entry.currency == currency)
            .map(|entry| &entry.status)
    }

    pub fn is_loading(&self) -> bool {
        self.currencies
            .iter()
            .any(|entry| entry.status == PreviewStatus::Loading)
    }

    /// Sets one entry's status. Returns false if the currency is not listed.
    pub(crate) fn set_status(&mut self, currency: Currency, status: PreviewStatus) -> bool {
        match self.currencies.iter_mut().find(|e| e.currency == currency) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sanitize_amount() {
        assert_eq!(sanitize_amount("750"), dec!(750));
        assert_eq!(sanitize_amount(" 0.5 "), dec!(0.5));
        assert_eq!(sanitize_amount(""), Decimal::ZERO);
        assert_eq!(sanitize_amount("12abc"), Decimal::ZERO);
        assert_eq!(sanitize_amount("."), Decimal::ZERO);
    }

    #[test]
    fn test_sanitize_amount_accepts_scientific_notation() {
        assert_eq!(sanitize_amount("1e3"), dec!(1000));
        assert_eq!(sanitize_amount(" 2.5E-1 "), dec!(0.25));
        assert_eq!(sanitize_amount("e3"), Decimal::ZERO);
    }

    #[test]
    fn test_send_enabled_bounds() {
        assert!(!has_sufficient_balance(Decimal::ZERO));
        assert!(!has_sufficient_balance(dec!(-1)));
        assert!(has_sufficient_balance(dec!(0.001)));
        assert!(has_sufficient_balance(dec!(10)));
        assert!(!has_sufficient_balance(dec!(10.001)));
    }

    #[test]
    fn test_display_state_derives_send_flag() {
        let state = DisplayState::new(
            "750".to_string(),
            dec!(0.5),
            dec!(0.003),
            Currency::Usd,
            InputMode::FiatToCrypto,
        );
        assert!(state.send_enabled);

        let state = DisplayState::new(
            "0".to_string(),
            Decimal::ZERO,
            dec!(0.003),
            Currency::Usd,
            InputMode::FiatToCrypto,
        );
        assert!(!state.send_enabled);
    }

    #[test]
    fn test_display_state_serializes_for_ui() {
        let state = DisplayState::new(
            "750".to_string(),
            dec!(0.5),
            dec!(0.003),
            Currency::Usd,
            InputMode::CryptoOnly,
        );
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["userInput"], "750");
        assert_eq!(json["cryptoAmount"], "0.5");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["inputMode"], "CRYPTO_ONLY");
        assert_eq!(json["sendEnabled"], true);
    }

    #[test]
    fn test_preview_starts_loading_in_order() {
        let state = PreviewState::loading(dec!(1));
        let order: Vec<Currency> = state.currencies.iter().map(|e| e.currency).collect();
        assert_eq!(order, vec![Currency::Eur, Currency::Usd, Currency::Gbp]);
        assert!(state.is_loading());
    }

    #[test]
    fn test_preview_set_status() {
        let mut state = PreviewState::loading(dec!(1));
        assert!(state.set_status(Currency::Usd, PreviewStatus::Loaded(dec!(1500))));
        assert_eq!(
            state.status_of(Currency::Usd),
            Some(&PreviewStatus::Loaded(dec!(1500)))
        );
        assert_eq!(state.status_of(Currency::Eur), Some(&PreviewStatus::Loading));
    }
}
