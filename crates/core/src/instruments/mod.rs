//! Instruments module - tradable tickers and their current prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tradable instrument as listed by `GET /strumenti/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    pub ticker: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "prezzoCorrente")]
    pub current_price: Decimal,
}

/// Looks up an instrument by ticker in a fetched list.
pub fn find_instrument<'a>(instruments: &'a [Instrument], ticker: &str) -> Option<&'a Instrument> {
    instruments.iter().find(|i| i.ticker == ticker)
}
