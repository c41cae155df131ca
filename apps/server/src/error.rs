use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    /// The backend could not be reached or its response could not be read.
    #[error("Backend service unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ProxyError::Unavailable(cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Backend service unavailable",
                cause,
            ),
            ProxyError::InvalidRequest(reason) => {
                (StatusCode::BAD_REQUEST, "Invalid request", reason)
            }
        };
        let body = Json(ErrorBody {
            error: error.to_string(),
            message,
        });
        (status, body).into_response()
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
