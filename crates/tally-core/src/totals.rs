//! # Totals Engine
//!
//! Pure derivation of cart totals from the current line items.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► Σ(unit_price × qty) ──► subtotal                             │
//! │                                       │                                 │
//! │            PricingPolicy::Flat        │  PricingPolicy::Taxed           │
//! │            ───────────────────        │  ────────────────────           │
//! │            tax = 0                    ├─► tax = subtotal × rate         │
//! │            shipping = 0               └─► shipping = subtotal > limit   │
//! │                                              ? 0 : flat fee             │
//! │                                                                         │
//! │  total = subtotal + tax + shipping                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are never cached; callers recompute after every change.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{LineItem, TaxRate};

/// Standard tax rate: 8%.
pub const STANDARD_TAX_RATE: TaxRate = TaxRate::from_bps(800);

/// Subtotal above which shipping is free: $50.00.
pub const STANDARD_FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(5000);

/// Shipping fee charged at or below the threshold: $5.99.
pub const STANDARD_SHIPPING_FEE: Money = Money::from_cents(599);

// =============================================================================
// Pricing Policy
// =============================================================================

/// How tax and shipping are derived from the subtotal.
///
/// Chosen once when the store is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingPolicy {
    /// Subtotal only: no tax, no shipping.
    Flat,
    /// Fixed-rate tax plus threshold-based shipping.
    Taxed {
        #[serde(rename = "taxRate")]
        tax_rate: TaxRate,
        /// Shipping is free when the subtotal is strictly above this.
        #[serde(rename = "freeShippingThreshold")]
        free_shipping_threshold: Money,
        #[serde(rename = "flatShippingFee")]
        flat_shipping_fee: Money,
    },
}

impl PricingPolicy {
    /// 8% tax, free shipping over $50.00, otherwise $5.99.
    pub const fn standard() -> Self {
        PricingPolicy::Taxed {
            tax_rate: STANDARD_TAX_RATE,
            free_shipping_threshold: STANDARD_FREE_SHIPPING_THRESHOLD,
            flat_shipping_fee: STANDARD_SHIPPING_FEE,
        }
    }

    /// Tax owed on `subtotal`.
    pub fn tax(&self, subtotal: Money) -> Money {
        match self {
            PricingPolicy::Flat => Money::zero(),
            PricingPolicy::Taxed { tax_rate, .. } => subtotal.calculate_tax(*tax_rate),
        }
    }

    /// Shipping owed for a cart with `subtotal` and `item_count` line items.
    ///
    /// An empty cart ships nothing and is never charged.
    pub fn shipping(&self, subtotal: Money, item_count: usize) -> Money {
        match self {
            PricingPolicy::Flat => Money::zero(),
            PricingPolicy::Taxed { .. } if item_count == 0 => Money::zero(),
            PricingPolicy::Taxed {
                free_shipping_threshold,
                flat_shipping_fee,
                ..
            } => {
                if subtotal > *free_shipping_threshold {
                    Money::zero()
                } else {
                    *flat_shipping_fee
                }
            }
        }
    }

    /// Tax rate applied by this policy, if any.
    pub fn tax_rate(&self) -> Option<TaxRate> {
        match self {
            PricingPolicy::Flat => None,
            PricingPolicy::Taxed { tax_rate, .. } => Some(*tax_rate),
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy::standard()
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived totals for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    /// Σ(unit price × quantity).
    pub subtotal: Money,
    /// Σ(quantity).
    pub total_items: i64,
    /// Number of line items, not weighted by quantity.
    pub total_products: usize,
    pub tax: Money,
    pub shipping: Money,
    /// subtotal + tax + shipping.
    pub total: Money,
}

impl Totals {
    /// Computes totals for `items` under `policy`.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::totals::{PricingPolicy, Totals};
    ///
    /// let totals = Totals::compute(&[], &PricingPolicy::standard());
    /// assert!(totals.total.is_zero());
    /// ```
    pub fn compute(items: &[LineItem], policy: &PricingPolicy) -> Totals {
        let (subtotal, total_items) = items.iter().fold(
            (Money::zero(), 0_i64),
            |(subtotal, count), item| (subtotal + item.line_total(), count + item.quantity()),
        );

        let tax = policy.tax(subtotal);
        let shipping = policy.shipping(subtotal, items.len());

        Totals {
            subtotal,
            total_items,
            total_products: items.len(),
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }

    /// True when shipping was waived for a non-empty cart ("FREE" in the view).
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero() && self.total_products > 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
