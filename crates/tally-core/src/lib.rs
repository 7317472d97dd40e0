//! # tally-core: Pure Cart Logic for Tally
//!
//! This crate is the **heart** of Tally. It holds the cart state machine and
//! the totals engine as plain Rust with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Host (tally-shell / any view layer)               │   │
//! │  │   form input ──► commands            snapshots ──► views        │   │
//! │  └──────────────────────┬─────────────────────▲────────────────────┘   │
//! │                         │                     │                         │
//! │  ┌──────────────────────▼─────────────────────┴────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │  totals   │  │   money   │  │ validation│  │   │
//! │  │   │ CartStore │  │  Totals   │  │   Money   │  │  parsers  │  │   │
//! │  │   │ ViewMode  │  │  Policy   │  │  TaxRate  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • SINGLE OWNER                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `CartStore`: line items, view mode, commands
//! - [`totals`] - `Totals` and the configurable `PricingPolicy`
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - `LineItem`, `LineItemId`, `TaxRate`, `ViewMode`
//! - [`draft`] - Pending add-item form buffer
//! - [`events`] - Change notifications for renderers
//! - [`validation`] - Required-field checks and numeric parsers
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{CartStore, ViewMode};
//!
//! let mut cart = CartStore::new();
//! cart.add_item("Widget", "10.00", "2", "").unwrap();
//! cart.add_item("Gadget", "25.50", "1", "blue").unwrap();
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal.to_string(), "$45.50");
//! assert_eq!(totals.total.to_string(), "$55.13");
//!
//! cart.enter_checkout().unwrap();
//! assert_eq!(cart.view_mode(), ViewMode::Checkout);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod events;
pub mod money;
pub mod store;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{DraftField, ItemDraft};
pub use error::{CartError, CartResult, ParseError, ValidationError};
pub use events::{CartEvent, CartObserver};
pub use money::Money;
pub use store::{CartSnapshot, CartStore, StoreConfig};
pub use totals::{PricingPolicy, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts. Overridable per store via `StoreConfig::max_items`.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Catches typos such as 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum length of a line item name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Largest unit price, shipping fee or free-shipping threshold: $1,000,000,000.00.
///
/// ## Business Reason
/// A full cart (100 lines × 999 at this price) doubled by a 100% tax, plus
/// a fee of this size, still fits in i64 cents.
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);
