use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::home_model::{PreviewState, PreviewStatus};
use crate::constants::PREVIEW_CURRENCIES;
use crate::conversion::FiatValueUseCase;
use crate::strings::{StringKey, StringResources};

/// Loads the fiat value of an ETH amount for every preview currency.
///
/// Each refresh cancels the previous batch and starts from all-loading.
pub(crate) struct PreviewLoader {
    fiat_value: FiatValueUseCase,
    strings: Arc<dyn StringResources>,
    state: Arc<watch::Sender<PreviewState>>,
    batch: Mutex<Option<JoinHandle<()>>>,
}

impl PreviewLoader {
    pub fn new(fiat_value: FiatValueUseCase, strings: Arc<dyn StringResources>) -> Self {
        let (state, _) = watch::channel(PreviewState::loading(Decimal::ZERO));
        Self {
            fiat_value,
            strings,
            state: Arc::new(state),
            batch: Mutex::new(None),
        }
    }

    fn lock_batch(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.batch.lock().unwrap_or_else(|poisoned| {
            warn!("Preview batch mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.state.subscribe()
    }

    /// Resets every entry to loading for `eth_amount` and starts a new batch.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn refresh(&self, eth_amount: Decimal) {
        let mut batch = self.lock_batch();
        if let Some(previous) = batch.take() {
            previous.abort();
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = state.generation + 1;
            *state = PreviewState::loading_batch(eth_amount, generation);
        });
        debug!("Loading preview batch {} for {} ETH", generation, eth_amount);

        *batch = Some(tokio::spawn(load_batch(
            self.fiat_value.clone(),
            self.strings.clone(),
            self.state.clone(),
            eth_amount,
            generation,
        )));
    }
}

impl Drop for PreviewLoader {
    fn drop(&mut self) {
        if let Some(batch) = self.lock_batch().take() {
            batch.abort();
        }
    }
}

async fn load_batch(
    fiat_value: FiatValueUseCase,
    strings: Arc<dyn StringResources>,
    state: Arc<watch::Sender<PreviewState>>,
    eth_amount: Decimal,
    generation: u64,
) {
    let (fiat_value, strings, state) = (&fiat_value, &strings, &state);

    let loads = PREVIEW_CURRENCIES.into_iter().map(|currency| async move {
        let status = match fiat_value.execute(currency, eth_amount).await {
            Ok(value) => PreviewStatus::Loaded(value),
            Err(err) => {
                warn!("Preview price for {} failed: {}", currency, err);
                PreviewStatus::Failed(strings.get_string(StringKey::PreviewRetry))
            }
        };
        // A newer batch owns the state once the generation moves on.
        state.send_if_modified(|current| {
            current.generation == generation && current.set_status(currency, status)
        });
    });

    join_all(loads).await;
}
