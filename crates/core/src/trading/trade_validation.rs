use rust_decimal::Decimal;

use crate::constants::MAX_ORDER_QUANTITY;
use crate::errors::ValidationError;
use crate::instruments::{find_instrument, Instrument};
use crate::portfolio::{find_position, OrderSide, Position};
use crate::trading::trading_model::{TradePreview, TradeConfirmation};

fn require_ticker(ticker: &str) -> Result<&str, ValidationError> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(ValidationError::MissingTicker);
    }
    Ok(ticker)
}

fn require_positive(quantity: i64) -> Result<u32, ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::InvalidQuantity);
    }
    u32::try_from(quantity).map_err(|_| ValidationError::InvalidQuantity)
}

/// Checks a buy against the cached instrument list.
///
/// Quantity bounds are blocking. The instrument has to be in the cache since
/// its price is what the confirmation shows.
pub fn validate_buy(
    instruments: &[Instrument],
    ticker: &str,
    quantity: i64,
) -> Result<TradeConfirmation, ValidationError> {
    let ticker = require_ticker(ticker)?;
    if quantity > i64::from(MAX_ORDER_QUANTITY) {
        return Err(ValidationError::QuantityAboveLimit {
            max: MAX_ORDER_QUANTITY,
        });
    }
    let quantity = require_positive(quantity)?;
    let instrument = find_instrument(instruments, ticker)
        .ok_or_else(|| ValidationError::UnknownInstrument(ticker.to_string()))?;

    Ok(TradeConfirmation {
        side: OrderSide::Buy,
        ticker: ticker.to_string(),
        quantity,
        unit_price: instrument.current_price,
        notional: Decimal::from(quantity) * instrument.current_price,
        warnings: Vec::new(),
    })
}

/// Checks a sell against the cached position list.
///
/// Selling more than the cached holdings only produces a warning: the cache
/// may be stale and the backend decides.
pub fn validate_sell(
    positions: &[Position],
    ticker: &str,
    quantity: i64,
) -> Result<TradeConfirmation, ValidationError> {
    let ticker = require_ticker(ticker)?;
    let quantity = require_positive(quantity)?;
    let position = find_position(positions, ticker)
        .ok_or_else(|| ValidationError::PositionNotHeld(ticker.to_string()))?;

    let mut warnings = Vec::new();
    if quantity > position.quantity {
        warnings.push(format!(
            "Quantity may not be available. Held: {}, requested: {}",
            position.quantity, quantity
        ));
    }

    Ok(TradeConfirmation {
        side: OrderSide::Sell,
        ticker: ticker.to_string(),
        quantity,
        unit_price: position.current_price,
        notional: Decimal::from(quantity) * position.current_price,
        warnings,
    })
}

pub fn preview_buy(instruments: &[Instrument], ticker: &str, quantity: i64) -> TradePreview {
    let ticker = ticker.trim();
    let unit_price = find_instrument(instruments, ticker).map(|i| i.current_price);
    TradePreview {
        side: OrderSide::Buy,
        ticker: ticker.to_string(),
        unit_price,
        notional: notional(unit_price, quantity),
        available: None,
        excessive: quantity > i64::from(MAX_ORDER_QUANTITY),
    }
}

/// Sell preview. Prices come from the instrument list when present, since
/// a price refresh updates it before the position list.
pub fn preview_sell(
    instruments: &[Instrument],
    positions: &[Position],
    ticker: &str,
    quantity: i64,
) -> TradePreview {
    let ticker = ticker.trim();
    let position = find_position(positions, ticker);
    let available = position.map(|p| p.quantity).unwrap_or(0);
    let unit_price = find_instrument(instruments, ticker)
        .map(|i| i.current_price)
        .or_else(|| position.map(|p| p.current_price));
    TradePreview {
        side: OrderSide::Sell,
        ticker: ticker.to_string(),
        unit_price,
        notional: notional(unit_price, quantity),
        available: Some(available),
        excessive: quantity > i64::from(available),
    }
}

fn notional(unit_price: Option<Decimal>, quantity: i64) -> Option<Decimal> {
    if quantity <= 0 {
        return None;
    }
    unit_price.map(|price| Decimal::from(quantity) * price)
}
