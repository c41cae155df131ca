use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use crate::account::DashboardSummary;
use crate::auth::{validate_login, validate_registration};
use crate::controller::generations::{SectionGenerations, Ticket};
use crate::controller::section::{AuthTab, Section};
use crate::controller::view::{Notification, View};
use crate::errors::{Error, Result};
use crate::gateway::BackendGateway;
use crate::instruments::Instrument;
use crate::portfolio::{OrderSide, Position};
use crate::session::Session;
use crate::trading::{
    preview_buy, preview_sell, validate_buy, validate_sell, TradeConfirmation, TradePreview,
};

/// Last fetched instrument and position lists. Trade checks read them;
/// each is replaced whenever its section reloads.
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    pub instruments: Vec<Instrument>,
    pub positions: Vec<Position>,
}

#[derive(Debug)]
struct ControllerState {
    active: Section,
    signed_in: bool,
    cache: ViewCache,
}

/// Drives sections, forms and trades on top of a [`BackendGateway`] and
/// renders through a [`View`].
pub struct ViewController<G, V> {
    gateway: Arc<G>,
    view: Arc<V>,
    session: Arc<Session>,
    generations: SectionGenerations,
    state: Mutex<ControllerState>,
}

impl<G, V> ViewController<G, V>
where
    G: BackendGateway,
    V: View,
{
    pub fn new(gateway: Arc<G>, view: Arc<V>, session: Arc<Session>) -> Self {
        Self {
            gateway,
            view,
            session,
            generations: SectionGenerations::new(),
            state: Mutex::new(ControllerState {
                active: Section::Auth,
                signed_in: false,
                cache: ViewCache::default(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn active_section(&self) -> Section {
        self.state().active
    }

    pub fn is_signed_in(&self) -> bool {
        self.state().signed_in
    }

    pub fn cache(&self) -> ViewCache {
        self.state().cache.clone()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Restores a persisted token and validates it with a probe call before
    /// revealing the app.
    pub async fn start(&self) {
        let restored = match self.session.restore() {
            Ok(found) => found,
            Err(e) => {
                warn!("Could not read persisted token: {}", e);
                false
            }
        };

        if !restored {
            self.show_auth();
            return;
        }

        match self.gateway.account().await {
            Ok(_) => {
                self.show_app();
                self.load_initial_data().await;
            }
            Err(e) => {
                warn!("Persisted token rejected: {}", e);
                self.logout();
                self.view
                    .notify(Notification::warning("Session expired. Please log in again"));
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) {
        let request = match validate_login(email, password) {
            Ok(request) => request,
            Err(e) => return self.report(e.into(), "Invalid credentials"),
        };

        self.view.set_loading(true);
        let result = self.gateway.login(&request).await;
        self.view.set_loading(false);

        let token = match result {
            Ok(response) => response.token,
            Err(e) => return self.report(e, "Login failed"),
        };
        if let Err(e) = self.session.begin(token) {
            return self.report(e, "Could not store the session");
        }

        self.show_app();
        self.view.notify(Notification::success("Login successful"));
        self.load_initial_data().await;
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) {
        let request = match validate_registration(name, email, password) {
            Ok(request) => request,
            Err(e) => return self.report(e.into(), "Registration failed"),
        };

        self.view.set_loading(true);
        let result = self.gateway.register(&request).await;
        self.view.set_loading(false);

        match result {
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Registration completed successfully".to_string());
                self.view.notify(Notification::success(message));
                self.view.show_auth_tab(AuthTab::Login);
            }
            Err(e) => self.report(e, "Registration failed"),
        }
    }

    /// Ends the session and returns to the auth screen. In-flight refreshes
    /// are invalidated so their responses are dropped.
    pub fn logout(&self) {
        if let Err(e) = self.session.end() {
            warn!("Logout: {}", e);
        }
        self.generations.invalidate_all();
        {
            let mut state = self.state();
            state.signed_in = false;
            state.cache = ViewCache::default();
        }
        self.show_auth();
    }

    fn show_auth(&self) {
        self.state().active = Section::Auth;
        self.view.show_section(Section::Auth);
        self.view.show_auth_tab(AuthTab::Login);
    }

    fn show_app(&self) {
        {
            let mut state = self.state();
            state.signed_in = true;
            state.active = Section::Dashboard;
        }
        self.view.show_section(Section::Dashboard);
    }

    async fn load_initial_data(&self) {
        self.refresh_instruments().await;
        self.refresh_dashboard().await;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation and section refreshes
    // ─────────────────────────────────────────────────────────────────────

    /// Shows a section and runs its refresh routine.
    pub async fn navigate(&self, section: Section) {
        if section.requires_session() && !self.is_signed_in() {
            self.view.notify(Notification::info("Log in to continue"));
            self.show_auth();
            return;
        }

        self.state().active = section;
        self.view.show_section(section);

        match section {
            Section::Auth => self.view.show_auth_tab(AuthTab::Login),
            Section::Dashboard => self.refresh_dashboard().await,
            Section::Trading => self.refresh_trading().await,
            Section::Portfolio => self.refresh_portfolio().await,
            Section::Instruments => self.refresh_instruments().await,
            Section::History => self.refresh_history().await,
        }
    }

    pub async fn refresh_dashboard(&self) {
        if let Err(e) = self.load_dashboard().await {
            self.report(e, "Failed to load the dashboard");
        }
    }

    pub async fn refresh_instruments(&self) {
        if let Err(e) = self.load_instruments().await {
            self.report(e, "Failed to load instruments");
        }
    }

    pub async fn refresh_portfolio(&self) {
        if let Err(e) = self.load_portfolio().await {
            self.report(e, "Failed to load the portfolio");
        }
    }

    pub async fn refresh_history(&self) {
        if let Err(e) = self.load_history().await {
            self.report(e, "Failed to load order history");
        }
    }

    /// The trading screen needs both caches: instruments for buys,
    /// positions for sells.
    pub async fn refresh_trading(&self) {
        self.refresh_instruments().await;
        self.refresh_portfolio().await;
    }

    /// Outcome of a section call, or `None` once a newer refresh, a
    /// navigation or a logout has superseded it. Failures are dropped too.
    fn if_current<T>(&self, ticket: Ticket, result: Result<T>) -> Result<Option<T>> {
        if !self.generations.is_current(ticket) {
            debug!("Dropping stale {} response", ticket.section());
            return Ok(None);
        }
        result.map(Some)
    }

    async fn load_dashboard(&self) -> Result<()> {
        let ticket = self.generations.begin(Section::Dashboard);
        let Some(account) = self.if_current(ticket, self.gateway.account().await)? else {
            return Ok(());
        };
        self.view.render_dashboard(&DashboardSummary::from(&account));
        Ok(())
    }

    async fn load_instruments(&self) -> Result<()> {
        let ticket = self.generations.begin(Section::Instruments);
        let Some(instruments) = self.if_current(ticket, self.gateway.instruments().await)? else {
            return Ok(());
        };
        self.state().cache.instruments = instruments.clone();
        self.view.render_instruments(&instruments);
        Ok(())
    }

    async fn load_portfolio(&self) -> Result<()> {
        let ticket = self.generations.begin(Section::Portfolio);
        let Some(portfolio) = self.if_current(ticket, self.gateway.portfolio().await)? else {
            return Ok(());
        };
        self.state().cache.positions = portfolio.positions.clone();
        self.view.render_portfolio(&portfolio);
        Ok(())
    }

    async fn load_history(&self) -> Result<()> {
        let ticket = self.generations.begin(Section::History);
        let Some(orders) = self.if_current(ticket, self.gateway.orders().await)? else {
            return Ok(());
        };
        self.view.render_history(&orders);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Trading
    // ─────────────────────────────────────────────────────────────────────

    pub async fn submit_buy(&self, ticker: &str, quantity: i64) {
        let checked = validate_buy(&self.state().cache.instruments, ticker, quantity);
        let confirmation = match checked {
            Ok(confirmation) => confirmation,
            Err(e) => return self.report(e.into(), "Purchase failed"),
        };
        if !self.confirmed(&confirmation).await {
            return;
        }

        self.view.set_loading(true);
        let result = self.gateway.buy(&confirmation.request()).await;
        self.view.set_loading(false);

        match result {
            Ok(_) => {
                self.view.notify(Notification::success(format!(
                    "Purchase of {} units of {} completed",
                    confirmation.quantity, confirmation.ticker
                )));
                self.refresh_dashboard().await;
                self.refresh_portfolio().await;
            }
            Err(e) => self.report(e, "Purchase failed"),
        }
    }

    pub async fn submit_sell(&self, ticker: &str, quantity: i64) {
        let checked = validate_sell(&self.state().cache.positions, ticker, quantity);
        let confirmation = match checked {
            Ok(confirmation) => confirmation,
            Err(e) => return self.report(e.into(), "Sale failed"),
        };
        if !self.confirmed(&confirmation).await {
            return;
        }

        self.view.set_loading(true);
        let result = self.gateway.sell(&confirmation.request()).await;
        self.view.set_loading(false);

        match result {
            Ok(_) => {
                self.view.notify(Notification::success(format!(
                    "Sale of {} units of {} completed",
                    confirmation.quantity, confirmation.ticker
                )));
                self.refresh_dashboard().await;
                self.refresh_portfolio().await;
                self.refresh_history().await;
            }
            Err(e) => self.report(e, "Sale failed"),
        }
    }

    async fn confirmed(&self, confirmation: &TradeConfirmation) -> bool {
        let approved = self.view.confirm(confirmation).await;
        if !approved {
            debug!(
                "{} of {} {} cancelled by user",
                confirmation.side.label(),
                confirmation.quantity,
                confirmation.ticker
            );
        }
        approved
    }

    /// Moves prices on the backend, replaces the instrument cache with the
    /// result and re-renders instruments, portfolio and dashboard.
    pub async fn refresh_prices(&self) {
        let ticket = self.generations.begin(Section::Instruments);
        self.view.set_loading(true);
        let result = self.gateway.refresh_quotes().await;
        self.view.set_loading(false);

        let instruments = match result {
            Ok(instruments) => instruments,
            Err(e) => return self.report(e, "Failed to refresh prices"),
        };
        self.view.notify(Notification::success("Prices refreshed"));
        if self.generations.is_current(ticket) {
            self.state().cache.instruments = instruments.clone();
            self.view.render_instruments(&instruments);
        }
        self.refresh_portfolio().await;
        self.refresh_dashboard().await;
    }

    pub fn preview_buy(&self, ticker: &str, quantity: i64) -> TradePreview {
        let preview = preview_buy(&self.state().cache.instruments, ticker, quantity);
        self.view.render_trade_preview(&preview);
        preview
    }

    pub fn preview_sell(&self, ticker: &str, quantity: i64) -> TradePreview {
        let preview = {
            let state = self.state();
            preview_sell(
                &state.cache.instruments,
                &state.cache.positions,
                ticker,
                quantity,
            )
        };
        self.view.render_trade_preview(&preview);
        preview
    }

    /// Shows a preview for either side.
    pub fn preview(&self, side: OrderSide, ticker: &str, quantity: i64) -> TradePreview {
        match side {
            OrderSide::Buy => self.preview_buy(ticker, quantity),
            OrderSide::Sell => self.preview_sell(ticker, quantity),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Error surfacing
    // ─────────────────────────────────────────────────────────────────────

    /// Turns a failed action into a notification. `fallback` is shown for
    /// failures that carry no user-facing message.
    fn report(&self, error: Error, fallback: &str) {
        match error {
            Error::Validation(e) => self.view.notify(Notification::error(e.to_string())),
            Error::SessionExpired => self.expire_session(),
            Error::SessionReplaced => {
                debug!("{}: answer for a previous session, ignoring", fallback)
            }
            Error::Backend { message, .. } => self.view.notify(Notification::error(message)),
            other => {
                warn!("{}: {}", fallback, other);
                self.view.notify(Notification::error(fallback));
            }
        }
    }

    fn expire_session(&self) {
        if !self.is_signed_in() {
            debug!("Session expiry reported after logout, ignoring");
            return;
        }
        self.logout();
        self.view
            .notify(Notification::warning("Session expired. Please log in again"));
    }
}
