//! # Validation Module
//!
//! Turns raw form text into the checked values a [`LineItem`] is built from.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Add Item Checks (in order)                         │
//! │                                                                         │
//! │  1. Presence   name, price, quantity non-empty    → ValidationError    │
//! │  2. Length     name at most 200 characters        → ValidationError    │
//! │  3. Numbers    price 0 to $1B, 2 decimals max     → ParseError         │
//! │                quantity integer in 1..=999        → ParseError         │
//! │  4. Capacity   fewer than 100 line items          → CartError          │
//! │                                                                         │
//! │  Any failure: cart untouched, user corrects and resubmits              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`LineItem`]: crate::types::LineItem

use crate::error::{ParseError, ValidationError};
use crate::money::Money;
use crate::{MAX_AMOUNT, MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Form field names, as they appear in error messages.
pub const FIELD_NAME: &str = "name";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_DESCRIPTION: &str = "description";

// =============================================================================
// String Validators
// =============================================================================

/// Fails with [`ValidationError::Required`] if `value` is empty or blank.
///
/// ## Returns
/// The trimmed value.
///
/// ## Example
/// ```rust
/// use tally_core::validation::require;
///
/// assert_eq!(require("name", "  Widget ").unwrap(), "Widget");
/// assert!(require("name", "   ").is_err());
/// ```
pub fn require<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Validates a line item name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = require(FIELD_NAME, name)?;

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: FIELD_NAME.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

/// Normalizes the optional description: blank text means "no description".
pub fn normalize_description(description: &str) -> Option<String> {
    let description = description.trim();
    (!description.is_empty()).then(|| description.to_string())
}

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a unit price.
///
/// ## Rules
/// - Zero is allowed (free items), negatives are not
/// - Must not exceed [`MAX_AMOUNT`]
pub fn parse_price(raw: &str) -> Result<Money, ParseError> {
    let price = Money::parse(FIELD_PRICE, raw)?;

    validate_price(price).map_err(|_| ParseError::AmountTooLarge {
        field: FIELD_PRICE.to_string(),
        max: MAX_AMOUNT,
    })?;

    Ok(price)
}

/// Parses a quantity.
///
/// ## Rules
/// - Plain integer (no fraction, no exponent, no `+`)
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## Example
/// ```rust
/// use tally_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("2").unwrap(), 2);
/// assert!(parse_quantity("0").is_err());
/// assert!(parse_quantity("2.5").is_err());
/// ```
pub fn parse_quantity(raw: &str) -> Result<i64, ParseError> {
    let text = raw.trim();
    let digits = text.strip_prefix('-').unwrap_or(text);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NotANumber {
            field: FIELD_QUANTITY.to_string(),
            value: raw.to_string(),
        });
    }

    let out_of_range = || ParseError::OutOfRange {
        field: FIELD_QUANTITY.to_string(),
        max: MAX_ITEM_QUANTITY,
    };

    let qty: i64 = text.parse().map_err(|_| out_of_range())?;

    validate_quantity(qty).map_err(|_| {
        if qty <= 0 {
            ParseError::MustBePositive {
                field: FIELD_QUANTITY.to_string(),
            }
        } else {
            out_of_range()
        }
    })?;

    Ok(qty)
}

// =============================================================================
// Value Validators
// =============================================================================

/// Validates an already-numeric quantity (1 to 999).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: FIELD_QUANTITY.to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an already-parsed unit price. Zero is allowed.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_amount(FIELD_PRICE, price)
}

/// Checks that a cart holding `current_items` line items has room for one more.
///
/// `max_items` is clamped to [`MAX_CART_ITEMS`].
pub fn validate_cart_size(current_items: usize, max_items: usize) -> ValidationResult<()> {
    let max = max_items.min(MAX_CART_ITEMS);
    if current_items >= max {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: max as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Configuration Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a price, fee or threshold: between zero and [`MAX_AMOUNT`].
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() || amount > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
