// src/error.rs

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;

/// Global client error enum.
/// Every service call and controller reduces its failures to one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    // Transport failure: connection refused, timeout, broken body
    Network(String),

    // 400 / 422
    BadRequest(String),

    // 401
    Unauthorized(String),

    // 403
    Forbidden(String),

    // 404
    NotFound(String),

    // 409
    Conflict(String),

    // 5xx
    Server { status: u16, message: String },

    // Any other non-success status
    Http { status: u16, message: String },

    // Response body did not match the expected shape
    Decode(String),

    // Form input rejected before any request was sent
    Validation(String),

    Config(String),

    Io(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "network error: {msg}"),
            AppError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            AppError::Unauthorized(msg) => write!(f, "unauthorized: {msg}"),
            AppError::Forbidden(msg) => write!(f, "forbidden: {msg}"),
            AppError::NotFound(msg) => write!(f, "not found: {msg}"),
            AppError::Conflict(msg) => write!(f, "conflict: {msg}"),
            AppError::Server { status, message } => write!(f, "server error {status}: {message}"),
            AppError::Http { status, message } => write!(f, "http error {status}: {message}"),
            AppError::Decode(msg) => write!(f, "unexpected response: {msg}"),
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::Config(msg) => write!(f, "configuration error: {msg}"),
            AppError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

/// Error body as the API sends it: `{"error": ".."}` or `{"message": ".."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl AppError {
    /// Maps a non-success response to an error, preferring the message the server sent.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    text
                }
            });

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AppError::BadRequest(message)
            }
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
            StatusCode::FORBIDDEN => AppError::Forbidden(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::CONFLICT => AppError::Conflict(message),
            s if s.is_server_error() => AppError::Server {
                status: s.as_u16(),
                message,
            },
            s => AppError::Http {
                status: s.as_u16(),
                message,
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// Text for an inline form message.
    ///
    /// Client-side validation and 4xx responses show their own message,
    /// transport failures a fixed connection hint, everything else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Network(_) => {
                "Failed to connect to the server. Please check your connection.".to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Converts `reqwest::Error` so `?` works on raw client calls.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AppError::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return AppError::from_response(status, &[]);
        }
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Keeps only the first message; forms show one message at a time.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_and_server_message() {
        let err = AppError::from_response(StatusCode::BAD_REQUEST, br#"{"error":"Invalid request"}"#);
        assert_eq!(err, AppError::BadRequest("Invalid request".to_string()));

        let err = AppError::from_response(StatusCode::UNAUTHORIZED, br#"{"message":"no session"}"#);
        assert!(err.is_unauthorized());

        let err = AppError::from_response(StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(
            err,
            AppError::Server {
                status: 502,
                message: "upstream down".to_string()
            }
        );
    }

    #[test]
    fn empty_body_falls_back_to_reason_phrase() {
        let err = AppError::from_response(StatusCode::NOT_FOUND, b"");
        assert_eq!(err, AppError::NotFound("Not Found".to_string()));
    }

    #[test]
    fn user_message_per_kind() {
        let fallback = "An error occurred while creating the quiz";
        assert_eq!(
            AppError::BadRequest("title too long".into()).user_message(fallback),
            "title too long"
        );
        assert_eq!(
            AppError::Network("refused".into()).user_message(fallback),
            "Failed to connect to the server. Please check your connection."
        );
        assert_eq!(
            AppError::Server {
                status: 500,
                message: "boom".into()
            }
            .user_message(fallback),
            fallback
        );
    }
}
