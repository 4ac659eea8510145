use std::str::FromStr;
use std::sync::Arc;

use ethwallet_market_data::{Currency, PriceSource};
use log::debug;
use rust_decimal::Decimal;
use tokio::sync::watch;

use super::display_pipeline::{set_if_changed, DisplayPipeline, InputCells};
use super::home_model::{DisplayState, InputMode, PreviewState};
use super::preview::PreviewLoader;
use super::shared_state::{SharedState, StateSubscription};
use crate::constants::{INPUT_DEBOUNCE, SHARE_GRACE_PERIOD};
use crate::conversion::{CryptoAmountUseCase, FiatValueUseCase, GasFeeUseCase};
use crate::errors::Result;
use crate::strings::StringResources;

/// State holder for the converter screen.
///
/// Inputs are plain setters; outputs are three independent streams:
/// - [`display_state`](Self::display_state): the converted amount, shared
///   between subscribers and only computed while someone is watching,
/// - [`error_state`](Self::error_state): the last user-facing error text,
///   empty when there is none,
/// - [`preview_state`](Self::preview_state): the amount valued in every
///   preview currency.
///
/// Setters and subscriptions must be used from within a Tokio runtime.
pub struct ConverterPresenter {
    inputs: Arc<InputCells>,
    display: SharedState<DisplayState>,
    errors: Arc<watch::Sender<String>>,
    preview: PreviewLoader,
}

impl ConverterPresenter {
    pub fn new(source: Arc<dyn PriceSource>, strings: Arc<dyn StringResources>) -> Self {
        let inputs = Arc::new(InputCells::new());
        let (errors, _) = watch::channel(String::new());
        let errors = Arc::new(errors);

        let pipeline = DisplayPipeline::new(
            inputs.clone(),
            CryptoAmountUseCase::new(source.clone()),
            GasFeeUseCase::new(source.clone()),
            strings.clone(),
            errors.clone(),
            INPUT_DEBOUNCE,
        );
        let display = SharedState::new("display_state", SHARE_GRACE_PERIOD, move |publisher| {
            pipeline.clone().run(publisher)
        });

        Self {
            inputs,
            display,
            errors,
            preview: PreviewLoader::new(FiatValueUseCase::new(source), strings),
        }
    }

    /// Replaces the amount text. Anything unparsable converts as zero but is
    /// echoed back unchanged.
    pub fn set_amount(&self, text: impl Into<String>) {
        set_if_changed(&self.inputs.amount, text.into());
    }

    /// Selects a currency by code, e.g. `"EUR"`.
    pub fn set_currency(&self, code: &str) -> Result<()> {
        let currency = Currency::from_str(code)?;
        self.select_currency(currency);
        Ok(())
    }

    pub fn select_currency(&self, currency: Currency) {
        set_if_changed(&self.inputs.currency, currency);
    }

    pub fn set_input_mode(&self, mode: InputMode) {
        set_if_changed(&self.inputs.mode, mode);
    }

    pub fn dismiss_error(&self) {
        self.errors.send_if_modified(|text| {
            if text.is_empty() {
                false
            } else {
                debug!("Error dismissed: {}", text);
                text.clear();
                true
            }
        });
    }

    /// Reloads the preview list for `eth_amount`, cancelling any load in progress.
    pub fn refresh_preview(&self, eth_amount: Decimal) {
        self.preview.refresh(eth_amount);
    }

    /// Subscribes to the display state. The last computed state is replayed
    /// immediately; nothing is computed until the first state arrives.
    pub fn display_state(&self) -> StateSubscription<DisplayState> {
        self.display.subscribe()
    }

    /// Last computed display state without subscribing.
    pub fn latest_display(&self) -> Option<DisplayState> {
        self.display.latest()
    }

    pub fn error_state(&self) -> watch::Receiver<String> {
        self.errors.subscribe()
    }

    pub fn preview_state(&self) -> watch::Receiver<PreviewState> {
        self.preview.subscribe()
    }
}
