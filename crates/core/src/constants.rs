use rust_decimal::Decimal;

/// Storage key the bearer token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "ef_token";

/// Every simulated account opens with this cash balance.
pub const INITIAL_BALANCE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Largest quantity a single buy order may request.
pub const MAX_ORDER_QUANTITY: u32 = 10_000;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// 401 from this endpoint means bad credentials, not an expired session.
pub const LOGIN_PATH: &str = "/auth/login";

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
