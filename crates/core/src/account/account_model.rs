//! Account domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::INITIAL_BALANCE;

/// Cash account as returned by `GET /conto/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub iban: String,
    #[serde(rename = "saldoContante")]
    pub cash_balance: Decimal,
    #[serde(rename = "valoreStrumenti")]
    pub instruments_value: Decimal,
    pub nav: Decimal,
    #[serde(rename = "movimenti", default)]
    pub cash_movements: Vec<CashMovement>,
}

/// A single deposit or withdrawal on the cash account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashMovement {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "descrizione")]
    pub description: String,
    #[serde(rename = "importo")]
    pub amount: Decimal,
}

/// What the dashboard shows for an account.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub iban: String,
    pub cash_balance: Decimal,
    pub instruments_value: Decimal,
    pub nav: Decimal,
    /// NAV measured against the fixed opening balance.
    pub unrealized_pnl: Decimal,
    pub recent_movements: Vec<CashMovement>,
}

/// Number of cash movements carried into the dashboard.
const RECENT_MOVEMENTS: usize = 5;

impl From<&Account> for DashboardSummary {
    fn from(account: &Account) -> Self {
        let skip = account.cash_movements.len().saturating_sub(RECENT_MOVEMENTS);
        Self {
            iban: account.iban.clone(),
            cash_balance: account.cash_balance,
            instruments_value: account.instruments_value,
            nav: account.nav,
            unrealized_pnl: account.nav - INITIAL_BALANCE,
            recent_movements: account.cash_movements[skip..].to_vec(),
        }
    }
}
