//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing prices as floats drifts:                                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "10.00" is parsed straight into 1000 cents                          │
//! │    Subtotal, tax and shipping all stay integers                        │
//! │    Two-decimal text only appears at the display boundary               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::parse("price", "10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let total = price.multiply_quantity(2) + Money::from_cents(500);
//! assert_eq!(total.to_string(), "$26.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::error::ParseError;
use crate::types::TaxRate;

/// Number of fraction digits accepted when parsing a price.
pub const MAX_DECIMALS: usize = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// "10.00" (form text) ──► Money::parse ──► LineItem.unit_price
///                                               │
///                                               ▼
///                         LineItem.line_total() = unit_price × quantity
///                                               │
///                                               ▼
///               Totals.subtotal ──► tax ──► shipping ──► Totals.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses user-entered decimal text into Money.
    ///
    /// `field` names the form field and is carried into any error.
    ///
    /// ## Accepted
    /// `12`, `12.5`, `12.50`, `.5`, `12.`, with surrounding whitespace.
    ///
    /// ## Rejected
    /// - empty text, signs other than a leading `-`, exponents, separators
    /// - more than two fraction digits ([`ParseError::TooPrecise`])
    /// - negative amounts ([`ParseError::Negative`]); `-0` reads as zero
    /// - amounts that overflow i64 cents
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::parse("price", "25.5").unwrap().cents(), 2550);
    /// assert!(Money::parse("price", "-1.00").is_err());
    /// assert!(Money::parse("price", "1.999").is_err());
    /// ```
    pub fn parse(field: &str, raw: &str) -> Result<Money, ParseError> {
        let text = raw.trim();

        match text.strip_prefix('-') {
            Some(rest) => match parse_unsigned(field, raw, rest) {
                Ok(amount) if amount.is_zero() => Ok(amount),
                Ok(_) => Err(ParseError::Negative {
                    field: field.to_string(),
                }),
                Err(err) => Err(err),
            },
            None => parse_unsigned(field, raw, text),
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.dollars(), 10);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax at the given rate, rounding half up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(4550); // $45.50
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
    /// assert_eq!(tax.cents(), 364); // $3.64
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so large subtotals cannot overflow before the division
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000); // $10.00
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 2000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

fn not_a_number(field: &str, raw: &str) -> ParseError {
    ParseError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    }
}

/// Parses `digits[.digits]` with no sign into cents.
fn parse_unsigned(field: &str, raw: &str, text: &str) -> Result<Money, ParseError> {
    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(not_a_number(field, raw));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return Err(not_a_number(field, raw));
    }
    if frac.len() > MAX_DECIMALS {
        return Err(ParseError::TooPrecise {
            field: field.to_string(),
            max_decimals: MAX_DECIMALS,
        });
    }

    let overflow = || ParseError::OutOfRange {
        field: field.to_string(),
        max: i64::MAX / 100,
    };

    let whole_units: i64 = if whole.is_empty() {
        0
    } else {
        // Only ascii digits remain, so the sole failure mode is overflow
        whole.parse().map_err(|_| overflow())?
    };
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| overflow())? * 10,
        _ => frac.parse().map_err(|_| overflow())?,
    };

    whole_units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(frac_cents))
        .map(Money::from_cents)
        .ok_or_else(overflow)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a dollar sign and two decimals.
///
/// ## Note
/// This is the only place cents become decimal text.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_AMOUNT, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse_accepts_plain_decimals() {
        assert_eq!(Money::parse("price", "10.00").unwrap().cents(), 1000);
        assert_eq!(Money::parse("price", "25.5").unwrap().cents(), 2550);
        assert_eq!(Money::parse("price", "7").unwrap().cents(), 700);
        assert_eq!(Money::parse("price", ".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("price", "12.").unwrap().cents(), 1200);
        assert_eq!(Money::parse("price", "  0.99 ").unwrap().cents(), 99);
        assert_eq!(Money::parse("price", "0").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", " ", ".", "abc", "1e3", "+5", "1,000", "1.2.3", "--5", "NaN", "- 5"] {
            let err = Money::parse("price", raw).unwrap_err();
            assert!(
                matches!(err, ParseError::NotANumber { .. }),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_negative_and_precision() {
        assert_eq!(
            Money::parse("price", "-1.00"),
            Err(ParseError::Negative {
                field: "price".to_string()
            })
        );
        assert_eq!(Money::parse("price", "-0").unwrap(), Money::zero());
        assert!(matches!(
            Money::parse("price", "1.999"),
            Err(ParseError::TooPrecise { max_decimals: 2, .. })
        ));
    }

    #[test]
    fn test_parse_overflow() {
        let err = Money::parse("price", "99999999999999999999").unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { .. }));
    }

    #[test]
    fn test_largest_cart_fits_in_cents() {
        let line = MAX_AMOUNT.multiply_quantity(MAX_ITEM_QUANTITY);
        let subtotal: Money = std::iter::repeat(line).take(MAX_CART_ITEMS).sum();
        let tax = subtotal.calculate_tax(TaxRate::from_bps(10000));
        let total = subtotal + tax + MAX_AMOUNT;

        assert_eq!(subtotal.cents(), 9_990_000_000_000_000);
        assert_eq!(tax, subtotal);
        assert!(!total.is_negative());
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // $10.00 at 8.25% = $0.825 → $0.83 (half up)
        let amount = Money::from_cents(1000);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(825)).cents(), 83);

        // $60.00 at 8% = $4.80
        let amount = Money::from_cents(6000);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(800)).cents(), 480);
    }

    #[test]
    fn test_sum_has_no_drift() {
        // Ten lots of $0.10 must be exactly $1.00
        let total: Money = std::iter::repeat(Money::parse("price", "0.10").unwrap())
            .take(10)
            .sum();
        assert_eq!(total.cents(), 100);
    }
}
