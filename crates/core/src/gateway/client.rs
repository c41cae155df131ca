//! HTTP client for the EasyFin backend REST API.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::account::Account;
use crate::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::constants::LOGIN_PATH;
use crate::errors::{Error, Result};
use crate::gateway::gateway_traits::BackendGateway;
use crate::instruments::Instrument;
use crate::portfolio::{Order, Portfolio, TradeRequest};
use crate::session::Session;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ACCOUNT_PATH: &str = "/conto/me";
const REGISTER_PATH: &str = "/auth/register";
const INSTRUMENTS_PATH: &str = "/strumenti/";
const REFRESH_QUOTES_PATH: &str = "/quotazioni/aggiorna";
const PORTFOLIO_PATH: &str = "/portafoglio/";
const ORDERS_PATH: &str = "/portafoglio/ordini";
const BUY_PATH: &str = "/portafoglio/ordini/acquisto";
const SELL_PATH: &str = "/portafoglio/ordini/vendita";

/// A response body, read exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ResponseBody {
    /// Best available message for a failed call: the JSON `error` field,
    /// else the raw text, else a generic status line.
    pub fn error_message(&self, status: StatusCode) -> String {
        let from_body = match self {
            ResponseBody::Json(value) => value
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            ResponseBody::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        };
        from_body.unwrap_or_else(|| format!("Error {}", status.as_u16()))
    }

    fn into_value(self) -> Value {
        match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
            ResponseBody::Empty => Value::Null,
        }
    }
}

/// Gateway to the backend.
///
/// Attaches the session's bearer token when one is held and turns a 401
/// outside the login endpoint into [`Error::SessionExpired`], dropping the
/// token on the way. A 401 for a token the session no longer holds becomes
/// [`Error::SessionReplaced`] and leaves the newer token in place.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `http://localhost:3000/api`
    /// * `session` - token holder shared with the controller
    pub fn new(base_url: &str, session: Arc<Session>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn headers(&self, token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match token {
            Some(token) => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::Unexpected(format!("Invalid token format: {}", e)))?;
                headers.insert(AUTHORIZATION, value);
            }
            None => debug!("[Api] No authentication token available"),
        }
        Ok(headers)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None::<&()>).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        self.send(Method::POST, path, body).await
    }

    /// Issues one call and decodes a successful body into `T`.
    pub async fn send<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Api] {} {}", method, url);

        // Kept so a late 401 only ends the session it was sent with.
        let token = self.session.token();
        let mut request = self
            .client
            .request(method, &url)
            .headers(self.headers(token.as_deref())?);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let body = read_body(response).await;

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED && !path.contains(LOGIN_PATH) {
                return match self.session.end_if(token.as_deref()) {
                    Ok(false) => {
                        debug!("[Api] {} answered 401 for a replaced token", path);
                        Err(Error::SessionReplaced)
                    }
                    _ => {
                        warn!("[Api] {} answered 401, session ended", path);
                        Err(Error::SessionExpired)
                    }
                };
            }
            let message = body.error_message(status);
            debug!("[Api] {} failed with {}: {}", path, status, message);
            return Err(Error::Backend {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(body.into_value())
            .map_err(|e| Error::Decode(format!("{} - {}", path, e)))
    }
}

/// Reads the body once, as JSON when the content type says so.
async fn read_body(response: reqwest::Response) -> ResponseBody {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("[Api] Failed to read response: {}", e);
            return ResponseBody::Empty;
        }
    };

    if is_json {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(e) => {
                warn!("[Api] Response declared JSON but did not parse: {}", e);
                ResponseBody::Empty
            }
        }
    } else if text.is_empty() {
        ResponseBody::Empty
    } else {
        ResponseBody::Text(text)
    }
}

#[async_trait]
impl BackendGateway for ApiClient {
    async fn account(&self) -> Result<Account> {
        self.get(ACCOUNT_PATH).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.post(LOGIN_PATH, Some(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        self.post(REGISTER_PATH, Some(request)).await
    }

    async fn instruments(&self) -> Result<Vec<Instrument>> {
        self.get(INSTRUMENTS_PATH).await
    }

    async fn refresh_quotes(&self) -> Result<Vec<Instrument>> {
        self.post(REFRESH_QUOTES_PATH, None::<&()>).await
    }

    async fn portfolio(&self) -> Result<Portfolio> {
        self.get(PORTFOLIO_PATH).await
    }

    async fn orders(&self) -> Result<Vec<Order>> {
        self.get(ORDERS_PATH).await
    }

    async fn buy(&self, request: &TradeRequest) -> Result<Portfolio> {
        self.post(BUY_PATH, Some(request)).await
    }

    async fn sell(&self, request: &TradeRequest) -> Result<Portfolio> {
        self.post(SELL_PATH, Some(request)).await
    }
}
