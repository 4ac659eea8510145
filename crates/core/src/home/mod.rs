//! Converter home screen: inputs, derived display state, errors and the
//! currency preview list.
//!
//! ```text
//!  set_amount / select_currency / set_input_mode
//!        │
//!        ▼
//!  InputCells ──► DisplayPipeline (debounce, latest-wins conversion)
//!                     │                      │
//!                     ▼                      ▼
//!        SharedState<DisplayState>     error text (side channel)
//!
//!  refresh_preview ──► PreviewLoader ──► PreviewState
//! ```

mod display_pipeline;
mod home_model;
mod home_presenter;
mod preview;
mod shared_state;


pub use home_model::{
    has_sufficient_balance, sanitize_amount, CurrencyPreview, DisplayState, InputMode,
    PreviewState, PreviewStatus, UiInputs,
};
pub use home_presenter::ConverterPresenter;
pub use shared_state::{SharedState, StatePublisher, StateSubscription};
