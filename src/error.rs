use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

/// Fixed user-facing message for failed lookups.
pub const NOT_FOUND_MESSAGE: &str = "We couldn't find what you wanted.";

/// Same message, percent-encoded for use as a redirect path segment.
pub const NOT_FOUND_SEGMENT: &str = "We%20couldn%27t%20find%20what%20you%20wanted.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{NOT_FOUND_MESSAGE}")]
    NotFound,

    #[error("Bad query!")]
    BadQuery,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound | Error::BadQuery => StatusCode::NOT_FOUND,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: true,
            message: self.to_string(),
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}
