use std::sync::Arc;

use ethwallet_core::strings::EnglishStrings;
use ethwallet_core::ConverterPresenter;
use ethwallet_market_data::{CoinGeckoProvider, EtherscanProvider, LivePriceSource};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::commands::Command;
use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("ETHWALLET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the state updates, so logs go to stderr.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_presenter(config: &Config) -> ConverterPresenter {
    let prices = CoinGeckoProvider::with_base_url(&config.coingecko_url, config.request_timeout);
    let gas = EtherscanProvider::with_base_url(
        &config.etherscan_url,
        config.etherscan_api_key.clone(),
        config.request_timeout,
    );
    tracing::info!(
        "Using price source {} and gas oracle {}",
        config.coingecko_url,
        config.etherscan_url
    );
    let source = LivePriceSource::new(Arc::new(prices), Arc::new(gas));
    ConverterPresenter::new(Arc::new(source), Arc::new(EnglishStrings))
}

/// Applies one command to the presenter. Returns false once the session should end.
pub fn apply(presenter: &ConverterPresenter, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Amount(text) => presenter.set_amount(text),
        Command::Currency(code) => presenter.set_currency(&code)?,
        Command::Mode(mode) => presenter.set_input_mode(mode),
        Command::Preview(amount) => presenter.refresh_preview(amount),
        Command::Dismiss => presenter.dismiss_error(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn print_update<T: Serialize>(label: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{label} {json}"),
        Err(e) => tracing::warn!("Failed to serialize {} update: {}", label, e),
    }
}

/// Spawns one printer per output stream.
pub fn spawn_printers(presenter: &ConverterPresenter) -> Vec<JoinHandle<()>> {
    let mut display = presenter.display_state();
    let mut errors = presenter.error_state();
    let mut preview = presenter.preview_state();

    vec![
        tokio::spawn(async move {
            while let Some(state) = display.changed().await {
                print_update("display", &state);
            }
        }),
        tokio::spawn(async move {
            while errors.changed().await.is_ok() {
                let message = errors.borrow_and_update().clone();
                if !message.is_empty() {
                    print_update("error", &message);
                }
            }
        }),
        tokio::spawn(async move {
            while preview.changed().await.is_ok() {
                let state = preview.borrow_and_update().clone();
                print_update("preview", &state);
            }
        }),
    ]
}
