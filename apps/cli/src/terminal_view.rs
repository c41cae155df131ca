//! Plain-text rendering of the controller's output.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use easyfin_core::account::DashboardSummary;
use easyfin_core::controller::{AuthTab, Notification, NotificationLevel, Section, View};
use easyfin_core::format::format_eur;
use easyfin_core::instruments::Instrument;
use easyfin_core::portfolio::{Order, Portfolio};
use easyfin_core::trading::{TradeConfirmation, TradePreview};
use rust_decimal::Decimal;
use tokio::io::{BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Stdin lines shared by the REPL loop and trade confirmations.
pub type InputLines = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub async fn read_line(input: &InputLines) -> std::io::Result<Option<String>> {
    input.lock().await.next_line().await
}

fn prompt(text: &str) {
    print!("{text}");
    // A failed flush only delays the prompt.
    let _ = std::io::stdout().flush();
}

/// Signed amount, e.g. `+250,00 €`.
fn signed_eur(amount: Decimal) -> String {
    if amount > Decimal::ZERO {
        format!("+{}", format_eur(amount))
    } else {
        format_eur(amount)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub struct TerminalView {
    input: InputLines,
}

impl TerminalView {
    pub fn new(input: InputLines) -> Self {
        Self { input }
    }
}

#[async_trait]
impl View for TerminalView {
    fn show_section(&self, section: Section) {
        println!();
        println!("== {} ==", section.name().to_uppercase());
    }

    fn show_auth_tab(&self, tab: AuthTab) {
        match tab {
            AuthTab::Login => println!("Sign in with: login <email> <password>"),
            AuthTab::Register => {
                println!("Create an account with: register <email> <password> <name>")
            }
        }
    }

    fn render_dashboard(&self, summary: &DashboardSummary) {
        println!("IBAN              {}", summary.iban);
        println!("Cash balance      {}", format_eur(summary.cash_balance));
        println!("Instruments value {}", format_eur(summary.instruments_value));
        println!("NAV               {}", format_eur(summary.nav));
        println!("P&L               {}", signed_eur(summary.unrealized_pnl));
        if summary.recent_movements.is_empty() {
            return;
        }
        println!();
        println!("{:<20} | {:<30} | {:>14}", "DATE", "DESCRIPTION", "AMOUNT");
        println!("{:-<20}-+-{:-<30}-+-{:->14}", "", "", "");
        for movement in &summary.recent_movements {
            println!(
                "{:<20} | {:<30} | {:>14}",
                movement.date,
                movement.description,
                signed_eur(movement.amount)
            );
        }
    }

    fn render_instruments(&self, instruments: &[Instrument]) {
        if instruments.is_empty() {
            println!("No instruments available");
            return;
        }
        println!("{:<8} | {:<30} | {:>14}", "TICKER", "NAME", "PRICE");
        println!("{:-<8}-+-{:-<30}-+-{:->14}", "", "", "");
        for i in instruments {
            println!(
                "{:<8} | {:<30} | {:>14}",
                i.ticker,
                i.name,
                format_eur(i.current_price)
            );
        }
    }

    fn render_portfolio(&self, portfolio: &Portfolio) {
        if portfolio.positions.is_empty() {
            println!("No open positions");
        } else {
            println!(
                "{:<8} | {:>8} | {:>12} | {:>12} | {:>14} | {:>14}",
                "TICKER", "QTY", "AVG COST", "PRICE", "VALUE", "P&L"
            );
            println!(
                "{:-<8}-+-{:->8}-+-{:->12}-+-{:->12}-+-{:->14}-+-{:->14}",
                "", "", "", "", "", ""
            );
            for p in &portfolio.positions {
                println!(
                    "{:<8} | {:>8} | {:>12} | {:>12} | {:>14} | {:>14}",
                    p.ticker,
                    p.quantity,
                    format_eur(p.average_cost),
                    format_eur(p.current_price),
                    format_eur(p.market_value),
                    signed_eur(p.unrealized_pnl)
                );
            }
        }
        if let Some(totals) = &portfolio.totals {
            println!();
            println!("Instruments value {}", format_eur(totals.instruments_value));
            println!("Cash balance      {}", format_eur(totals.cash_balance));
            println!("NAV               {}", format_eur(totals.nav));
            println!("Unrealized P&L    {}", signed_eur(totals.unrealized_pnl));
        }
    }

    fn render_history(&self, orders: &[Order]) {
        if orders.is_empty() {
            println!("No orders yet");
            return;
        }
        println!(
            "{:<20} | {:<4} | {:<8} | {:>8} | {:>12} | {:>14}",
            "DATE", "SIDE", "TICKER", "QTY", "PRICE", "REALIZED"
        );
        println!(
            "{:-<20}-+-{:-<4}-+-{:-<8}-+-{:->8}-+-{:->12}-+-{:->14}",
            "", "", "", "", "", ""
        );
        for o in orders {
            let realized = o.realized_pnl.map(signed_eur).unwrap_or_else(|| "-".into());
            println!(
                "{:<20} | {:<4} | {:<8} | {:>8} | {:>12} | {:>14}",
                o.date,
                o.side.label(),
                o.ticker,
                o.quantity,
                format_eur(o.execution_price),
                realized
            );
        }
    }

    fn render_trade_preview(&self, preview: &TradePreview) {
        match preview.unit_price {
            Some(price) => println!("{} price: {}", preview.ticker, format_eur(price)),
            None => println!("{}: no price available", preview.ticker),
        }
        if let Some(notional) = preview.notional {
            println!("Estimated total: {}", format_eur(notional));
        }
        if let Some(available) = preview.available {
            println!("Available units: {available}");
        }
        if preview.excessive {
            println!("Warning: quantity too large");
        }
    }

    fn set_loading(&self, loading: bool) {
        if loading {
            println!("...");
        }
    }

    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
        };
        match notification.level {
            NotificationLevel::Error | NotificationLevel::Warning => {
                eprintln!("[{tag}] {}", notification.message)
            }
            _ => println!("[{tag}] {}", notification.message),
        }
    }

    async fn confirm(&self, confirmation: &TradeConfirmation) -> bool {
        for warning in &confirmation.warnings {
            println!("Warning: {warning}");
        }
        prompt(&format!("{} [y/N] ", confirmation.prompt()));
        match read_line(&self.input).await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}

pub fn show_prompt() {
    prompt("easyfin> ");
}
