//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    TaxRate      │   │    ViewMode     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (counter)   │   │  bps (u32)      │   │  Cart           │       │
//! │  │  name           │   │  800 = 8%       │   │  Checkout       │       │
//! │  │  unit_price     │   └─────────────────┘   └─────────────────┘       │
//! │  │  quantity       │                                                    │
//! │  │  description?   │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    /// ```
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Line Item Identity
// =============================================================================

/// Identifier of a line item, unique for the lifetime of one store.
///
/// Issued by the store's monotonic counter, never by the clock, so two items
/// added within the same millisecond still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemId(u64);

impl LineItemId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        LineItemId(raw)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Invariants
/// - `name` is non-empty
/// - `unit_price >= 0`
/// - `quantity >= 1`
///
/// Fields are private: a line item is only built by the store after
/// validation, and is never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    id: LineItemId,
    name: String,
    unit_price: Money,
    quantity: i64,
    description: Option<String>,
    /// When this item was added to the cart (display only).
    #[ts(as = "String")]
    added_at: DateTime<Utc>,
}

impl LineItem {
    pub(crate) fn new(
        id: LineItemId,
        name: String,
        unit_price: Money,
        quantity: i64,
        description: Option<String>,
    ) -> Self {
        LineItem {
            id,
            name,
            unit_price,
            quantity,
            description,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn id(&self) -> LineItemId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// View Mode
// =============================================================================

/// Which top-level screen is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Item entry and the running list.
    #[default]
    Cart,
    /// Read-only order summary.
    Checkout,
}

// =============================================================================
// Unit Tests
// =============================================================================
