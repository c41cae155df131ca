//! Portfolio domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Held quantity of one instrument; every value is computed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub ticker: String,
    #[serde(rename = "quantita")]
    pub quantity: u32,
    #[serde(rename = "prezzoMedio")]
    pub average_cost: Decimal,
    #[serde(rename = "prezzoCorrente")]
    pub current_price: Decimal,
    #[serde(rename = "valoreMercato")]
    pub market_value: Decimal,
    #[serde(rename = "pnlNonRealizzato")]
    pub unrealized_pnl: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioTotals {
    #[serde(rename = "valoreStrumenti")]
    pub instruments_value: Decimal,
    #[serde(rename = "saldoContante")]
    pub cash_balance: Decimal,
    pub nav: Decimal,
    #[serde(rename = "pnlNonRealizzatoTotale")]
    pub unrealized_pnl: Decimal,
}

/// Response of `GET /portafoglio/` and of both order endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    #[serde(rename = "posizioni", default)]
    pub positions: Vec<Position>,
    #[serde(rename = "totali", default)]
    pub totals: Option<PortfolioTotals>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderSide {
    #[serde(rename = "ACQUISTO")]
    Buy,
    #[serde(rename = "VENDITA")]
    Sell,
}

impl OrderSide {
    pub fn label(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

/// An executed order in the history list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "tipo")]
    pub side: OrderSide,
    pub ticker: String,
    #[serde(rename = "quantita")]
    pub quantity: u32,
    #[serde(rename = "prezzoEsecuzione")]
    pub execution_price: Decimal,
    #[serde(rename = "stato", default)]
    pub status: Option<String>,
    /// Only sells realize P&L.
    #[serde(rename = "pnlRealizzato", default)]
    pub realized_pnl: Option<Decimal>,
}

/// Body of both order endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeRequest {
    pub ticker: String,
    #[serde(rename = "quantita")]
    pub quantity: u32,
}

/// Looks up a position by ticker in a fetched list.
pub fn find_position<'a>(positions: &'a [Position], ticker: &str) -> Option<&'a Position> {
    positions.iter().find(|p| p.ticker == ticker)
}
