use async_trait::async_trait;

use crate::account::Account;
use crate::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::errors::Result;
use crate::instruments::Instrument;
use crate::portfolio::{Order, Portfolio, TradeRequest};

/// Every backend call the client makes.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// `GET /conto/me`. Doubles as the cheap probe that validates a
    /// restored token.
    async fn account(&self) -> Result<Account>;
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse>;
    async fn instruments(&self) -> Result<Vec<Instrument>>;
    /// Asks the backend to move prices and returns the updated list.
    async fn refresh_quotes(&self) -> Result<Vec<Instrument>>;
    async fn portfolio(&self) -> Result<Portfolio>;
    async fn orders(&self) -> Result<Vec<Order>>;
    async fn buy(&self, request: &TradeRequest) -> Result<Portfolio>;
    async fn sell(&self, request: &TradeRequest) -> Result<Portfolio>;
}
