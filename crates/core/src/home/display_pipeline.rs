//! Derives [`DisplayState`] from the input cells.
//!
//! One task owns the whole derivation:
//! 1. any input change produces a candidate [`UiInputs`] and restarts the
//!    debounce timer,
//! 2. a candidate that survives the quiet period settles and its conversion
//!    is spawned, aborting whatever conversion was still in flight,
//! 3. a finished conversion is combined with the live amount text and input
//!    mode and published; a failed one only updates the error text.
//!
//! Raw text and mode changes re-publish immediately with the last settled
//! conversion, so the screen echoes keystrokes without a price request.

use std::sync::Arc;
use std::time::Duration;

use ethwallet_market_data::Currency;
use log::{debug, warn};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;

use super::home_model::{DisplayState, InputMode, UiInputs};
use super::shared_state::StatePublisher;
use crate::constants::INITIAL_AMOUNT;
use crate::conversion::{CryptoAmountUseCase, GasFeeUseCase};
use crate::errors::{Error, Result};
use crate::strings::{StringKey, StringResources};

/// The three user-editable cells.
pub(crate) struct InputCells {
    pub amount: watch::Sender<String>,
    pub currency: watch::Sender<Currency>,
    pub mode: watch::Sender<InputMode>,
}

impl InputCells {
    pub fn new() -> Self {
        Self {
            amount: watch::channel(INITIAL_AMOUNT.to_string()).0,
            currency: watch::channel(Currency::Usd).0,
            mode: watch::channel(InputMode::FiatToCrypto).0,
        }
    }

    /// Current cells combined into a sanitized tuple.
    pub fn snapshot(&self) -> UiInputs {
        UiInputs::new(
            &self.amount.borrow(),
            *self.currency.borrow(),
            *self.mode.borrow(),
        )
    }
}

/// Publishes `value` unless the cell already holds it.
pub(crate) fn set_if_changed<T: PartialEq>(cell: &watch::Sender<T>, value: T) {
    cell.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

#[derive(Clone, Copy, Debug)]
struct Conversion {
    crypto_amount: Decimal,
    gas_fee: Decimal,
}

struct Settled {
    inputs: UiInputs,
    conversion: Conversion,
}

/// Spawned conversion, aborted when dropped. The pipeline future owns it, so
/// tearing the pipeline down also stops the request in flight.
struct ConversionTask(JoinHandle<Result<Conversion>>);

impl Drop for ConversionTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Clone)]
pub(crate) struct DisplayPipeline {
    inputs: Arc<InputCells>,
    crypto_amount: CryptoAmountUseCase,
    gas_fee: GasFeeUseCase,
    strings: Arc<dyn StringResources>,
    errors: Arc<watch::Sender<String>>,
    debounce: Duration,
}

impl DisplayPipeline {
    pub fn new(
        inputs: Arc<InputCells>,
        crypto_amount: CryptoAmountUseCase,
        gas_fee: GasFeeUseCase,
        strings: Arc<dyn StringResources>,
        errors: Arc<watch::Sender<String>>,
        debounce: Duration,
    ) -> Self {
        Self {
            inputs,
            crypto_amount,
            gas_fee,
            strings,
            errors,
            debounce,
        }
    }

    /// Runs until aborted by the owning [`SharedState`](super::SharedState).
    pub async fn run(self, publisher: StatePublisher<DisplayState>) {
        let mut amount_rx = self.inputs.amount.subscribe();
        let mut currency_rx = self.inputs.currency.subscribe();
        let mut mode_rx = self.inputs.mode.subscribe();

        let mut pending = Some(self.inputs.snapshot());
        let debounce = tokio::time::sleep(self.debounce);
        tokio::pin!(debounce);

        let mut in_flight: Option<(UiInputs, ConversionTask)> = None;
        let mut settled: Option<Settled> = None;

        loop {
            tokio::select! {
                changed = next_input_change(&mut amount_rx, &mut currency_rx, &mut mode_rx) => {
                    if changed.is_err() {
                        break;
                    }
                    pending = Some(self.inputs.snapshot());
                    debounce.as_mut().reset(Instant::now() + self.debounce);
                    if let Some(settled) = &settled {
                        publisher.send_replace(Some(self.render(settled)));
                    }
                }
                () = &mut debounce, if pending.is_some() => {
                    if let Some(inputs) = pending.take() {
                        if let Some((superseded, _task)) = in_flight.take() {
                            debug!("Superseding in-flight conversion for {:?}", superseded);
                        }
                        settled = None;
                        let task = self.spawn_conversion(inputs.clone());
                        in_flight = Some((inputs, task));
                    }
                }
                joined = join_in_flight(&mut in_flight), if in_flight.is_some() => {
                    let Some((inputs, _)) = in_flight.take() else {
                        continue;
                    };
                    match joined {
                        Ok(Ok(conversion)) => {
                            let done = Settled { inputs, conversion };
                            publisher.send_replace(Some(self.render(&done)));
                            settled = Some(done);
                        }
                        Ok(Err(err)) => self.report(&err),
                        Err(err) if err.is_cancelled() => {}
                        Err(err) => self.report(&Error::Unexpected(err.to_string())),
                    }
                }
            }
        }
    }

    fn spawn_conversion(&self, inputs: UiInputs) -> ConversionTask {
        debug!("Converting settled inputs {:?}", inputs);
        ConversionTask(tokio::spawn(convert(
            self.crypto_amount.clone(),
            self.gas_fee.clone(),
            inputs,
        )))
    }

    fn render(&self, settled: &Settled) -> DisplayState {
        DisplayState::new(
            self.inputs.amount.borrow().clone(),
            settled.conversion.crypto_amount,
            settled.conversion.gas_fee,
            settled.inputs.currency,
            *self.inputs.mode.borrow(),
        )
    }

    fn report(&self, err: &Error) {
        warn!("Conversion failed: {}", err);
        let key = if err.is_connectivity() {
            StringKey::ErrorInternetConnection
        } else {
            StringKey::ErrorGeneric
        };
        self.errors.send_replace(self.strings.get_string(key));
    }
}

/// Amount and fee for one settled tuple. In crypto-only mode the typed value
/// is already the ETH amount and no price is requested.
async fn convert(
    crypto_amount: CryptoAmountUseCase,
    gas_fee: GasFeeUseCase,
    inputs: UiInputs,
) -> Result<Conversion> {
    let amount = async {
        match inputs.input_mode {
            InputMode::FiatToCrypto => crypto_amount.execute(inputs.currency, inputs.value).await,
            InputMode::CryptoOnly => Ok(inputs.value),
        }
    };
    let (eth_amount, eth_fee) = tokio::try_join!(amount, gas_fee.execute())?;
    Ok(Conversion {
        crypto_amount: eth_amount,
        gas_fee: eth_fee,
    })
}

async fn next_input_change(
    amount: &mut watch::Receiver<String>,
    currency: &mut watch::Receiver<Currency>,
    mode: &mut watch::Receiver<InputMode>,
) -> std::result::Result<(), watch::error::RecvError> {
    tokio::select! {
        changed = amount.changed() => changed,
        changed = currency.changed() => changed,
        changed = mode.changed() => changed,
    }
}

async fn join_in_flight(
    in_flight: &mut Option<(UiInputs, ConversionTask)>,
) -> std::result::Result<Result<Conversion>, JoinError> {
    match in_flight {
        Some((_, task)) => (&mut task.0).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cells_start_with_defaults() {
        let cells = InputCells::new();
        let inputs = cells.snapshot();
        assert_eq!(inputs.value, Decimal::ZERO);
        assert_eq!(inputs.currency, Currency::Usd);
        assert_eq!(inputs.input_mode, InputMode::FiatToCrypto);
    }

    #[test]
    fn test_snapshot_sanitizes_amount() {
        let cells = InputCells::new();
        cells.amount.send_replace("12,5".to_string());
        assert_eq!(cells.snapshot().value, Decimal::ZERO);
        cells.amount.send_replace("12.5".to_string());
        assert_eq!(cells.snapshot().value, dec!(12.5));
    }

    #[test]
    fn test_set_if_changed_skips_equal_values() {
        let cells = InputCells::new();
        let mut rx = cells.currency.subscribe();
        set_if_changed(&cells.currency, Currency::Usd);
        assert!(!rx.has_changed().unwrap());
        set_if_changed(&cells.currency, Currency::Eur);
        assert!(rx.has_changed().unwrap());
    }
}
