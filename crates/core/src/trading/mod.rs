//! Trading module - advisory order checks, confirmations and previews.

mod trade_validation;
mod trading_model;

pub use trade_validation::{preview_buy, preview_sell, validate_buy, validate_sell};
pub use trading_model::{TradeConfirmation, TradePreview};
