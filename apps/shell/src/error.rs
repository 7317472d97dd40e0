//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  input line ──► Command::parse ── unknown verb ──► UNKNOWN_COMMAND      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               view gate ──────── item edit in Checkout ──► VIEW_LOCKED  │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               CartStore ──────── CartError ──► VALIDATION_ERROR         │
//! │                                               PARSE_ERROR               │
//! │                                               CART_ERROR                │
//! │                                                                         │
//! │  Every error is shown to the user; the session keeps running.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tally_core::CartError;
use thiserror::Error;

/// Error returned from shell commands.
///
/// ## Serialization
/// In JSON output mode the user receives:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "name is required"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A required field is missing or too long
    ValidationError,

    /// A number could not be read
    ParseError,

    /// Cart rule violated (full cart, empty checkout)
    CartError,

    /// Command not available in the current view
    ViewLocked,

    /// Input line is not a known command
    UnknownCommand,

    /// Invalid configuration
    ConfigError,

    /// I/O or serialization failure
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ParseError, message)
    }

    pub fn view_locked(command: &str) -> Self {
        ApiError::new(
            ErrorCode::ViewLocked,
            format!("'{command}' is not available during checkout; use 'back' first"),
        )
    }

    pub fn unknown_command(verb: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command '{verb}'; type 'help' for a list"),
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts cart errors to API errors.
impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Validation(inner) => {
                ApiError::new(ErrorCode::ValidationError, inner.to_string())
            }
            CartError::Parse(inner) => ApiError::new(ErrorCode::ParseError, inner.to_string()),
            other @ (CartError::CartFull { .. } | CartError::EmptyCart) => {
                ApiError::new(ErrorCode::CartError, other.to_string())
            }
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(format!("I/O error: {err}"))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Serialization error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{ParseError, ValidationError};

    #[test]
    fn test_cart_errors_map_to_codes() {
        let err: ApiError = CartError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");

        let err: ApiError = CartError::Parse(ParseError::MustBePositive {
            field: "quantity".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ParseError);

        let err: ApiError = CartError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_serializes_code_and_message() {
        let json = serde_json::to_value(ApiError::view_locked("add")).unwrap();
        assert_eq!(json["code"], "VIEW_LOCKED");
        assert!(json["message"].as_str().unwrap().contains("'add'"));
    }
}
