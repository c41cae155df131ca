//! Tests for the view controller's section, auth and trade workflows.

#[cfg(test)]
mod tests {
    use crate::account::{Account, DashboardSummary};
    use crate::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
    use crate::controller::{
        AuthTab, Notification, NotificationLevel, Section, View, ViewController,
    };
    use crate::errors::{Error, Result};
    use crate::gateway::BackendGateway;
    use crate::instruments::Instrument;
    use crate::portfolio::{Order, OrderSide, Portfolio, Position, TradeRequest};
    use crate::session::{MemoryTokenStore, Session, TokenStore};
    use crate::trading::{TradeConfirmation, TradePreview};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    // =========================================================================
    // Mock gateway
    // =========================================================================

    #[derive(Clone, Copy)]
    enum Failure {
        SessionExpired,
        SessionReplaced,
        Backend(u16, &'static str),
        Transport,
    }

    impl Failure {
        fn into_error(self) -> Error {
            match self {
                Failure::SessionExpired => Error::SessionExpired,
                Failure::SessionReplaced => Error::SessionReplaced,
                Failure::Backend(status, message) => Error::Backend {
                    status,
                    message: message.to_string(),
                },
                Failure::Transport => Error::Transport("connection refused".to_string()),
            }
        }
    }

    fn account(nav: Decimal) -> Account {
        Account {
            iban: "IT60X0542811101000000123456".to_string(),
            cash_balance: dec!(7000),
            instruments_value: nav - dec!(7000),
            nav,
            cash_movements: Vec::new(),
        }
    }

    fn instrument(ticker: &str, price: Decimal) -> Instrument {
        Instrument {
            ticker: ticker.to_string(),
            name: format!("{ticker} S.p.A."),
            current_price: price,
        }
    }

    fn position(ticker: &str, quantity: u32, price: Decimal) -> Position {
        Position {
            ticker: ticker.to_string(),
            quantity,
            average_cost: price,
            current_price: price,
            market_value: Decimal::from(quantity) * price,
            unrealized_pnl: Decimal::ZERO,
        }
    }

    struct MockGateway {
        calls: Mutex<Vec<&'static str>>,
        failures: Mutex<HashMap<&'static str, Failure>>,
        instruments: Mutex<Vec<Instrument>>,
        positions: Mutex<Vec<Position>>,
        slow_portfolios: Mutex<VecDeque<(Duration, Vec<Position>)>>,
        slow_portfolio_failure: Mutex<Option<(Duration, Failure)>>,
        trades: Mutex<Vec<TradeRequest>>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failures: Mutex::new(HashMap::new()),
                instruments: Mutex::new(vec![
                    instrument("ENI", dec!(14.20)),
                    instrument("ENEL", dec!(6.50)),
                ]),
                positions: Mutex::new(vec![position("ENI", 20, dec!(14))]),
                slow_portfolios: Mutex::new(VecDeque::new()),
                slow_portfolio_failure: Mutex::new(None),
                trades: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, name: &'static str) -> Result<()> {
            self.calls.lock().unwrap().push(name);
            match self.failures.lock().unwrap().get(name) {
                Some(failure) => Err(failure.into_error()),
                None => Ok(()),
            }
        }

        fn fail(&self, name: &'static str, failure: Failure) {
            self.failures.lock().unwrap().insert(name, failure);
        }

        fn count(&self, name: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn reset_calls(&self) {
            self.calls.lock().unwrap().clear();
        }

        fn trades(&self) -> Vec<TradeRequest> {
            self.trades.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BackendGateway for MockGateway {
        async fn account(&self) -> Result<Account> {
            self.record("account")?;
            Ok(account(dec!(10250)))
        }

        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
            self.record("login")?;
            Ok(LoginResponse {
                token: format!("token-for-{}", request.email),
            })
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<RegisterResponse> {
            self.record("register")?;
            Ok(RegisterResponse {
                message: Some("Registrazione completata con successo".to_string()),
            })
        }

        async fn instruments(&self) -> Result<Vec<Instrument>> {
            self.record("instruments")?;
            Ok(self.instruments.lock().unwrap().clone())
        }

        async fn refresh_quotes(&self) -> Result<Vec<Instrument>> {
            self.record("refresh_quotes")?;
            let mut instruments = self.instruments.lock().unwrap();
            for i in instruments.iter_mut() {
                i.current_price += dec!(1);
            }
            Ok(instruments.clone())
        }

        async fn portfolio(&self) -> Result<Portfolio> {
            self.record("portfolio")?;
            let failure = self.slow_portfolio_failure.lock().unwrap().take();
            if let Some((delay, failure)) = failure {
                tokio::time::sleep(delay).await;
                return Err(failure.into_error());
            }
            let slow = self.slow_portfolios.lock().unwrap().pop_front();
            let positions = match slow {
                Some((delay, positions)) => {
                    tokio::time::sleep(delay).await;
                    positions
                }
                None => self.positions.lock().unwrap().clone(),
            };
            Ok(Portfolio {
                positions,
                totals: None,
            })
        }

        async fn orders(&self) -> Result<Vec<Order>> {
            self.record("orders")?;
            Ok(vec![Order {
                id: Some(1),
                date: "2024-05-02T09:30:00".to_string(),
                side: OrderSide::Buy,
                ticker: "ENI".to_string(),
                quantity: 20,
                execution_price: dec!(14),
                status: None,
                realized_pnl: None,
            }])
        }

        async fn buy(&self, request: &TradeRequest) -> Result<Portfolio> {
            self.record("buy")?;
            self.trades.lock().unwrap().push(request.clone());
            Ok(Portfolio {
                positions: Vec::new(),
                totals: None,
            })
        }

        async fn sell(&self, request: &TradeRequest) -> Result<Portfolio> {
            self.record("sell")?;
            self.trades.lock().unwrap().push(request.clone());
            Ok(Portfolio {
                positions: Vec::new(),
                totals: None,
            })
        }
    }

    // =========================================================================
    // Recording view
    // =========================================================================

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Section(Section),
        AuthTab(AuthTab),
        Dashboard(DashboardSummary),
        Instruments(Vec<String>),
        Portfolio(Vec<String>),
        History(usize),
        Preview(TradePreview),
        Loading(bool),
        Notify(Notification),
        Confirm(TradeConfirmation),
    }

    struct RecordingView {
        events: Mutex<Vec<Event>>,
        approve: AtomicBool,
    }

    impl RecordingView {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                approve: AtomicBool::new(true),
            }
        }

        fn push(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn clear(&self) {
            self.events.lock().unwrap().clear();
        }

        fn notifications(&self) -> Vec<Notification> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Notify(n) => Some(n),
                    _ => None,
                })
                .collect()
        }

        fn last_notification(&self) -> Option<Notification> {
            self.notifications().pop()
        }

        fn confirmations(&self) -> Vec<TradeConfirmation> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Confirm(c) => Some(c),
                    _ => None,
                })
                .collect()
        }

        fn rendered_portfolios(&self) -> Vec<Vec<String>> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Portfolio(tickers) => Some(tickers),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl View for RecordingView {
        fn show_section(&self, section: Section) {
            self.push(Event::Section(section));
        }

        fn show_auth_tab(&self, tab: AuthTab) {
            self.push(Event::AuthTab(tab));
        }

        fn render_dashboard(&self, summary: &DashboardSummary) {
            self.push(Event::Dashboard(summary.clone()));
        }

        fn render_instruments(&self, instruments: &[Instrument]) {
            self.push(Event::Instruments(
                instruments.iter().map(|i| i.ticker.clone()).collect(),
            ));
        }

        fn render_portfolio(&self, portfolio: &Portfolio) {
            self.push(Event::Portfolio(
                portfolio.positions.iter().map(|p| p.ticker.clone()).collect(),
            ));
        }

        fn render_history(&self, orders: &[Order]) {
            self.push(Event::History(orders.len()));
        }

        fn render_trade_preview(&self, preview: &TradePreview) {
            self.push(Event::Preview(preview.clone()));
        }

        fn set_loading(&self, loading: bool) {
            self.push(Event::Loading(loading));
        }

        fn notify(&self, notification: Notification) {
            self.push(Event::Notify(notification));
        }

        async fn confirm(&self, confirmation: &TradeConfirmation) -> bool {
            self.push(Event::Confirm(confirmation.clone()));
            self.approve.load(Ordering::SeqCst)
        }
    }

    // =========================================================================
    // Harness
    // =========================================================================

    struct Harness {
        gateway: Arc<MockGateway>,
        view: Arc<RecordingView>,
        session: Arc<Session>,
        store: Arc<MemoryTokenStore>,
        controller: ViewController<MockGateway, RecordingView>,
    }

    fn harness(stored_token: Option<&str>) -> Harness {
        let store = Arc::new(match stored_token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        });
        let session = Arc::new(Session::new(store.clone()));
        let gateway = Arc::new(MockGateway::new());
        let view = Arc::new(RecordingView::new());
        let controller = ViewController::new(gateway.clone(), view.clone(), session.clone());
        Harness {
            gateway,
            view,
            session,
            store,
            controller,
        }
    }

    async fn signed_in() -> Harness {
        let h = harness(None);
        h.controller.login("anna@easyfin.it", "segreta").await;
        h.controller.navigate(Section::Trading).await;
        h.gateway.reset_calls();
        h.view.clear();
        h
    }

    // =========================================================================
    // Startup and auth
    // =========================================================================

    #[tokio::test]
    async fn start_without_token_shows_auth_without_network() {
        let h = harness(None);
        h.controller.start().await;

        assert!(h.gateway.calls().is_empty());
        assert_eq!(h.controller.active_section(), Section::Auth);
        assert!(h.view.events().contains(&Event::Section(Section::Auth)));
    }

    #[tokio::test]
    async fn start_with_valid_token_checks_account_before_revealing_app() {
        let h = harness(Some("persisted"));
        h.controller.start().await;

        assert_eq!(h.gateway.calls(), vec!["account", "instruments", "account"]);
        assert_eq!(h.controller.active_section(), Section::Dashboard);
        assert!(h.controller.is_signed_in());
        assert_eq!(h.session.token().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn start_with_rejected_token_logs_out_and_warns() {
        let h = harness(Some("expired"));
        h.gateway.fail("account", Failure::SessionExpired);
        h.controller.start().await;

        assert_eq!(h.gateway.calls(), vec!["account"]);
        assert!(!h.session.is_authenticated());
        assert!(h.store.load().unwrap().is_none());
        assert_eq!(h.controller.active_section(), Section::Auth);
        let notice = h.view.last_notification().unwrap();
        assert_eq!(notice.level, NotificationLevel::Warning);
    }

    #[tokio::test]
    async fn login_validation_happens_before_network() {
        let h = harness(None);
        h.controller.login("   ", "segreta").await;

        assert!(h.gateway.calls().is_empty());
        let notice = h.view.last_notification().unwrap();
        assert_eq!(notice.level, NotificationLevel::Error);
        assert_eq!(notice.message, "Enter email and password");
    }

    #[tokio::test]
    async fn login_stores_token_and_opens_dashboard() {
        let h = harness(None);
        h.controller.login(" anna@easyfin.it ", "segreta").await;

        assert_eq!(
            h.store.load().unwrap().as_deref(),
            Some("token-for-anna@easyfin.it")
        );
        assert_eq!(h.controller.active_section(), Section::Dashboard);
        assert_eq!(h.gateway.calls(), vec!["login", "instruments", "account"]);
        assert_eq!(h.controller.cache().instruments.len(), 2);
        assert!(h
            .view
            .notifications()
            .contains(&Notification::success("Login successful")));
    }

    #[tokio::test]
    async fn rejected_login_shows_backend_message_without_logout_notice() {
        let h = harness(None);
        h.gateway
            .fail("login", Failure::Backend(401, "Credenziali non valide"));
        h.controller.login("anna@easyfin.it", "sbagliata").await;

        assert_eq!(
            h.view.notifications(),
            vec![Notification::error("Credenziali non valide")]
        );
        assert_eq!(h.controller.active_section(), Section::Auth);
        assert!(!h.session.is_authenticated());
    }

    #[tokio::test]
    async fn unreachable_backend_on_login_is_not_called_bad_credentials() {
        let h = harness(None);
        h.gateway.fail("login", Failure::Transport);
        h.controller.login("anna@easyfin.it", "segreta").await;

        assert_eq!(
            h.view.notifications(),
            vec![Notification::error("Login failed")]
        );
        assert!(!h.session.is_authenticated());
        assert_eq!(h.controller.active_section(), Section::Auth);
    }

    #[tokio::test]
    async fn registration_checks_password_length_locally() {
        let h = harness(None);
        h.controller.register("Anna", "anna@easyfin.it", "12345").await;

        assert!(h.gateway.calls().is_empty());
        assert_eq!(
            h.view.last_notification().unwrap().message,
            "Password must be at least 6 characters long"
        );
    }

    #[tokio::test]
    async fn registration_success_switches_to_login_tab() {
        let h = harness(None);
        h.controller
            .register("Anna", "anna@easyfin.it", "123456")
            .await;

        assert_eq!(h.gateway.calls(), vec!["register"]);
        assert!(h.view.events().contains(&Event::AuthTab(AuthTab::Login)));
        assert_eq!(
            h.view.last_notification().unwrap(),
            Notification::success("Registrazione completata con successo")
        );
    }

    #[tokio::test]
    async fn logout_clears_token_and_caches() {
        let h = signed_in().await;
        assert!(!h.controller.cache().positions.is_empty());

        h.controller.logout();

        assert!(!h.session.is_authenticated());
        assert!(h.store.load().unwrap().is_none());
        assert!(h.controller.cache().instruments.is_empty());
        assert!(h.controller.cache().positions.is_empty());
        assert_eq!(h.controller.active_section(), Section::Auth);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[tokio::test]
    async fn each_section_runs_its_own_refresh() {
        let h = signed_in().await;

        h.controller.navigate(Section::History).await;
        assert_eq!(h.gateway.calls(), vec!["orders"]);
        assert!(h.view.events().contains(&Event::History(1)));

        h.gateway.reset_calls();
        h.controller.navigate(Section::Trading).await;
        assert_eq!(h.gateway.calls(), vec!["instruments", "portfolio"]);

        h.gateway.reset_calls();
        h.controller.navigate(Section::Dashboard).await;
        assert_eq!(h.gateway.calls(), vec!["account"]);
        assert_eq!(h.controller.active_section(), Section::Dashboard);
    }

    #[tokio::test]
    async fn dashboard_shows_pnl_against_opening_balance() {
        let h = signed_in().await;
        h.controller.navigate(Section::Dashboard).await;

        let summary = h
            .view
            .events()
            .into_iter()
            .find_map(|e| match e {
                Event::Dashboard(summary) => Some(summary),
                _ => None,
            })
            .unwrap();
        assert_eq!(summary.nav, dec!(10250));
        assert_eq!(summary.unrealized_pnl, dec!(250));
    }

    #[tokio::test]
    async fn navigating_while_signed_out_lands_on_auth() {
        let h = harness(None);
        h.controller.navigate(Section::Portfolio).await;

        assert!(h.gateway.calls().is_empty());
        assert_eq!(h.controller.active_section(), Section::Auth);
    }

    #[tokio::test]
    async fn stale_section_response_is_dropped() {
        let h = signed_in().await;
        h.gateway
            .slow_portfolios
            .lock()
            .unwrap()
            .push_back((Duration::from_millis(50), vec![position("OLD", 1, dec!(1))]));

        tokio::join!(
            h.controller.refresh_portfolio(),
            h.controller.refresh_portfolio()
        );

        assert_eq!(h.gateway.count("portfolio"), 2);
        assert_eq!(h.view.rendered_portfolios(), vec![vec!["ENI".to_string()]]);
        assert_eq!(h.controller.cache().positions[0].ticker, "ENI");
    }

    #[tokio::test]
    async fn responses_arriving_after_logout_are_dropped() {
        let h = signed_in().await;
        h.gateway
            .slow_portfolios
            .lock()
            .unwrap()
            .push_back((Duration::from_millis(50), vec![position("ENI", 5, dec!(1))]));

        tokio::join!(h.controller.refresh_portfolio(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.controller.logout();
        });

        assert!(h.view.rendered_portfolios().is_empty());
        assert!(h.controller.cache().positions.is_empty());
    }

    #[tokio::test]
    async fn failures_arriving_after_logout_are_dropped() {
        let h = signed_in().await;
        *h.gateway.slow_portfolio_failure.lock().unwrap() = Some((
            Duration::from_millis(50),
            Failure::Backend(500, "Archivio non disponibile"),
        ));

        tokio::join!(h.controller.refresh_portfolio(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.controller.logout();
        });

        assert!(h
            .view
            .notifications()
            .iter()
            .all(|n| n.level != NotificationLevel::Error));
        assert_eq!(h.controller.active_section(), Section::Auth);
    }

    #[tokio::test]
    async fn superseded_refresh_failure_is_not_reported() {
        let h = signed_in().await;
        *h.gateway.slow_portfolio_failure.lock().unwrap() =
            Some((Duration::from_millis(50), Failure::Transport));

        tokio::join!(h.controller.refresh_portfolio(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.controller.refresh_portfolio().await;
        });

        assert!(h.view.notifications().is_empty());
        assert_eq!(h.view.rendered_portfolios(), vec![vec!["ENI".to_string()]]);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[tokio::test]
    async fn session_expiry_forces_logout_once() {
        let h = signed_in().await;
        h.gateway.fail("account", Failure::SessionExpired);
        h.gateway.fail("portfolio", Failure::SessionExpired);

        h.controller.refresh_dashboard().await;
        h.controller.refresh_portfolio().await;

        assert_eq!(h.controller.active_section(), Section::Auth);
        assert!(!h.session.is_authenticated());
        let warnings: Vec<_> = h
            .view
            .notifications()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
    }

    #[tokio::test]
    async fn unauthorized_answer_for_replaced_token_keeps_session() {
        let h = signed_in().await;
        h.gateway.fail("portfolio", Failure::SessionReplaced);

        h.controller.refresh_portfolio().await;

        assert!(h.controller.is_signed_in());
        assert_eq!(h.controller.active_section(), Section::Trading);
        assert_eq!(
            h.session.token().as_deref(),
            Some("token-for-anna@easyfin.it")
        );
        assert!(h.view.notifications().is_empty());
    }

    #[tokio::test]
    async fn backend_errors_are_shown_verbatim() {
        let h = signed_in().await;
        h.gateway
            .fail("orders", Failure::Backend(500, "Archivio non disponibile"));
        h.controller.navigate(Section::History).await;

        assert_eq!(
            h.view.last_notification().unwrap(),
            Notification::error("Archivio non disponibile")
        );
    }

    #[tokio::test]
    async fn transport_errors_get_a_generic_notice() {
        let h = signed_in().await;
        h.gateway.fail("instruments", Failure::Transport);
        h.controller.navigate(Section::Instruments).await;

        assert_eq!(
            h.view.last_notification().unwrap(),
            Notification::error("Failed to load instruments")
        );
        assert!(h.controller.is_signed_in());
    }

    // =========================================================================
    // Trading
    // =========================================================================

    #[tokio::test]
    async fn buy_above_limit_is_rejected_before_network() {
        let h = signed_in().await;
        h.controller.submit_buy("ENI", 10_001).await;

        assert!(h.gateway.calls().is_empty());
        assert!(h.view.confirmations().is_empty());
        assert_eq!(
            h.view.last_notification().unwrap().message,
            "Maximum quantity allowed: 10000 units"
        );
    }

    #[tokio::test]
    async fn buy_at_limit_is_confirmed_and_forwarded() {
        let h = signed_in().await;
        h.controller.submit_buy("ENI", 10_000).await;

        let confirmations = h.view.confirmations();
        assert_eq!(confirmations.len(), 1);
        assert_eq!(confirmations[0].notional, dec!(142000));
        assert_eq!(
            h.gateway.trades(),
            vec![TradeRequest {
                ticker: "ENI".to_string(),
                quantity: 10_000,
            }]
        );
    }

    #[tokio::test]
    async fn successful_buy_refreshes_dashboard_and_portfolio_once() {
        let h = signed_in().await;
        h.controller.submit_buy("ENEL", 3).await;

        assert_eq!(h.gateway.count("buy"), 1);
        assert_eq!(h.gateway.count("account"), 1);
        assert_eq!(h.gateway.count("portfolio"), 1);
        assert_eq!(h.gateway.count("orders"), 0);
        assert!(h.view.notifications().contains(&Notification::success(
            "Purchase of 3 units of ENEL completed"
        )));
    }

    #[tokio::test]
    async fn declined_confirmation_sends_nothing() {
        let h = signed_in().await;
        h.view.approve.store(false, Ordering::SeqCst);
        h.controller.submit_buy("ENI", 2).await;

        assert_eq!(h.view.confirmations().len(), 1);
        assert!(h.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn rejected_buy_shows_backend_reason() {
        let h = signed_in().await;
        h.gateway
            .fail("buy", Failure::Backend(400, "Saldo insufficiente"));
        h.controller.submit_buy("ENI", 5000).await;

        assert_eq!(h.gateway.calls(), vec!["buy"]);
        assert_eq!(
            h.view.last_notification().unwrap(),
            Notification::error("Saldo insufficiente")
        );
    }

    #[tokio::test]
    async fn sell_of_unheld_ticker_is_rejected_before_network() {
        let h = signed_in().await;
        h.controller.submit_sell("ENEL", 1).await;

        assert!(h.gateway.calls().is_empty());
        assert_eq!(
            h.view.last_notification().unwrap().message,
            "Position ENEL not found in portfolio"
        );
    }

    #[tokio::test]
    async fn sell_above_cached_holdings_warns_but_defers_to_backend() {
        let h = signed_in().await;
        h.controller.submit_sell("ENI", 25).await;

        let confirmations = h.view.confirmations();
        assert_eq!(confirmations[0].warnings.len(), 1);
        assert_eq!(confirmations[0].notional, dec!(350));
        assert_eq!(h.gateway.count("sell"), 1);
        assert_eq!(h.gateway.count("account"), 1);
        assert_eq!(h.gateway.count("portfolio"), 1);
        assert_eq!(h.gateway.count("orders"), 1);
    }

    #[tokio::test]
    async fn price_refresh_replaces_cache_and_cascades() {
        let h = signed_in().await;
        h.controller.refresh_prices().await;

        assert_eq!(
            h.gateway.calls(),
            vec!["refresh_quotes", "portfolio", "account"]
        );
        let eni = h
            .controller
            .cache()
            .instruments
            .into_iter()
            .find(|i| i.ticker == "ENI")
            .unwrap();
        assert_eq!(eni.current_price, dec!(15.20));
        assert!(h
            .view
            .events()
            .contains(&Event::Instruments(vec!["ENI".to_string(), "ENEL".to_string()])));
    }

    #[tokio::test]
    async fn previews_use_cached_prices() {
        let h = signed_in().await;
        let preview = h.controller.preview(OrderSide::Buy, "ENEL", 10);
        assert_eq!(preview.notional, Some(dec!(65)));
        assert!(!preview.excessive);

        let preview = h.controller.preview(OrderSide::Sell, "ENI", 30);
        assert_eq!(preview.available, Some(20));
        assert!(preview.excessive);
        assert!(h.gateway.calls().is_empty());
    }
}
