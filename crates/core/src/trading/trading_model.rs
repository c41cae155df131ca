//! Client-side trade confirmation and preview models.

use rust_decimal::Decimal;

use crate::format::format_eur;
use crate::portfolio::{OrderSide, TradeRequest};

/// A trade that passed the blocking checks and awaits user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeConfirmation {
    pub side: OrderSide,
    pub ticker: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub notional: Decimal,
    /// Advisory findings against possibly stale cached data.
    pub warnings: Vec<String>,
}

impl TradeConfirmation {
    pub fn prompt(&self) -> String {
        match self.side {
            OrderSide::Buy => format!(
                "Confirm purchase of {} units of {} for a total of {}?",
                self.quantity,
                self.ticker,
                format_eur(self.notional)
            ),
            OrderSide::Sell => format!(
                "Confirm sale of {} units of {} for proceeds of {}?",
                self.quantity,
                self.ticker,
                format_eur(self.notional)
            ),
        }
    }

    pub fn request(&self) -> TradeRequest {
        TradeRequest {
            ticker: self.ticker.clone(),
            quantity: self.quantity,
        }
    }
}

/// Live price/notional hint while a trade form is being filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePreview {
    pub side: OrderSide,
    pub ticker: String,
    pub unit_price: Option<Decimal>,
    pub notional: Option<Decimal>,
    /// Held units, sells only.
    pub available: Option<u32>,
    /// Quantity is above the order limit (buy) or the cached holdings (sell).
    pub excessive: bool,
}
