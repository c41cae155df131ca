//! Core error types for the EasyFin client.
//!
//! The taxonomy follows how a failure has to be surfaced to the user:
//! validation failures never leave the client, an expired session forces a
//! logout, backend rejections are shown verbatim and transport problems get a
//! generic notice.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the client.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The backend answered 401 on an authenticated call. The held token has
    /// already been dropped when this is returned.
    #[error("Session expired")]
    SessionExpired,

    /// A 401 for a token that had already been replaced by a newer login.
    /// The current session is left untouched.
    #[error("Request belonged to a previous session")]
    SessionReplaced,

    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Token store error: {0}")]
    TokenStore(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Whether the user has to authenticate again before retrying.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired)
    }

    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Advisory checks performed before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter email and password")]
    MissingCredentials,

    #[error("Fill in all required fields")]
    MissingRegistrationFields,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Select an instrument")]
    MissingTicker,

    #[error("Enter a valid quantity (minimum 1)")]
    InvalidQuantity,

    #[error("Maximum quantity allowed: {max} units")]
    QuantityAboveLimit { max: u32 },

    #[error("Instrument {0} not found. Refresh prices and try again")]
    UnknownInstrument(String),

    #[error("Position {0} not found in portfolio")]
    PositionNotHeld(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::TokenStore(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
