//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CartError        - Store command failures                         │
//! │  ├── ValidationError  - Required/length/range failures                 │
//! │  └── ParseError       - Raw text that is not a usable number           │
//! │                                                                         │
//! │  tally-shell errors (app)                                              │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError / ParseError → CartError → ApiError → View      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recovery
//! None of these are fatal. A failed command leaves the cart exactly as it
//! was and the user resubmits corrected input.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors returned by [`CartStore`](crate::store::CartStore) commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A field failed a presence, length or range rule.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A numeric field could not be read as a price or quantity.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Cart already holds the maximum number of line items.
    #[error("Cart cannot have more than {max} items")]
    CartFull { max: usize },

    /// Checkout was requested for an empty cart while the store requires items.
    ///
    /// Only raised when `StoreConfig::require_items_for_checkout` is set.
    #[error("Cannot check out an empty cart")]
    EmptyCart,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur before any parsing: the field is missing, too long, or a
/// parsed value falls outside a configured limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Name of the offending field, for inline form messages.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Numeric parse failures for raw form text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Text is not a plain decimal number.
    #[error("{field} is not a valid number: '{value}'")]
    NotANumber { field: String, value: String },

    /// Value is below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Value must be at least one.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// More fraction digits than the currency allows.
    #[error("{field} allows at most {max_decimals} decimal places")]
    TooPrecise { field: String, max_decimals: usize },

    /// Value is too large to represent or exceeds the allowed maximum.
    #[error("{field} cannot exceed {max}")]
    OutOfRange { field: String, max: i64 },

    /// Amount parsed but is above the largest amount a cart accepts.
    #[error("{field} cannot exceed {max}")]
    AmountTooLarge { field: String, max: Money },
}

impl ParseError {
    /// Name of the offending field, for inline form messages.
    pub fn field(&self) -> &str {
        match self {
            ParseError::NotANumber { field, .. }
            | ParseError::Negative { field }
            | ParseError::MustBePositive { field }
            | ParseError::TooPrecise { field, .. }
            | ParseError::OutOfRange { field, .. }
            | ParseError::AmountTooLarge { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::CartFull { max: 100 };
        assert_eq!(err.to_string(), "Cart cannot have more than 100 items");

        let err = ParseError::NotANumber {
            field: "price".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "price is not a valid number: 'abc'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
        assert_eq!(err.field(), "name");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_errors_convert_to_cart_error() {
        let validation_err = ValidationError::Required {
            field: "quantity".to_string(),
        };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::Validation(_)));

        let parse_err = ParseError::Negative {
            field: "price".to_string(),
        };
        let cart_err: CartError = parse_err.into();
        assert!(matches!(cart_err, CartError::Parse(_)));
        assert_eq!(cart_err.to_string(), "Parse error: price cannot be negative");
    }

    #[test]
    fn test_amount_too_large_message() {
        let err = ParseError::AmountTooLarge {
            field: "price".to_string(),
            max: crate::MAX_AMOUNT,
        };
        assert_eq!(err.to_string(), "price cannot exceed $1000000000.00");
        assert_eq!(err.field(), "price");
    }
}
