use async_trait::async_trait;

use crate::account::DashboardSummary;
use crate::controller::section::{AuthTab, Section};
use crate::instruments::Instrument;
use crate::portfolio::{Order, Portfolio};
use crate::trading::{TradeConfirmation, TradePreview};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
    Warning,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }
}

/// Rendering surface driven by the controller.
#[async_trait]
pub trait View: Send + Sync {
    fn show_section(&self, section: Section);
    fn show_auth_tab(&self, tab: AuthTab);
    fn render_dashboard(&self, summary: &DashboardSummary);
    fn render_instruments(&self, instruments: &[Instrument]);
    fn render_portfolio(&self, portfolio: &Portfolio);
    fn render_history(&self, orders: &[Order]);
    fn render_trade_preview(&self, preview: &TradePreview);
    fn set_loading(&self, loading: bool);
    fn notify(&self, notification: Notification);
    /// Asks the user to approve a trade. `false` aborts it.
    async fn confirm(&self, confirmation: &TradeConfirmation) -> bool;
}
