//! # Cart Store
//!
//! Owns the cart state and exposes the only legal mutations.
//!
//! ## View State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     ┌──────────┐   enter_checkout()    ┌──────────┐                    │
//! │     │   Cart   │ ────────────────────► │ Checkout │                    │
//! │     │ (start)  │ ◄──────────────────── │          │                    │
//! │     └──────────┘    exit_checkout()    └──────────┘                    │
//! │          │                                                              │
//! │     add_item / submit_draft / remove_item                               │
//! │                                                                         │
//! │  The store itself does not lock item edits in Checkout; the host       │
//! │  decides what each view exposes.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! `CartStore` is a plain owned value. Command handlers borrow it mutably,
//! renderers borrow it immutably or subscribe via [`CartObserver`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::draft::{DraftField, ItemDraft};
use crate::error::{CartError, CartResult};
use crate::events::{CartEvent, CartObserver};
use crate::money::Money;
use crate::totals::{PricingPolicy, Totals};
use crate::types::{LineItem, LineItemId, ViewMode};
use crate::validation::{
    normalize_description, parse_price, parse_quantity, require, validate_cart_size,
    validate_item_name, FIELD_NAME, FIELD_PRICE, FIELD_QUANTITY,
};
use crate::MAX_CART_ITEMS;

// =============================================================================
// Configuration
// =============================================================================

/// Settings fixed when the store is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub policy: PricingPolicy,
    /// Reject `enter_checkout` while the cart is empty.
    pub require_items_for_checkout: bool,
    /// Maximum number of line items.
    pub max_items: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            policy: PricingPolicy::standard(),
            require_items_for_checkout: false,
            max_items: MAX_CART_ITEMS,
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only view of the cart for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub view_mode: ViewMode,
    pub totals: Totals,
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart and its view mode.
///
/// ## Invariants
/// - Items keep insertion order
/// - Ids come from a counter and are never reused, even after removal
/// - A failed command leaves items, view mode and draft untouched
pub struct CartStore {
    items: Vec<LineItem>,
    view_mode: ViewMode,
    draft: ItemDraft,
    next_id: u64,
    config: StoreConfig,
    observers: Vec<Box<dyn CartObserver>>,
}

impl CartStore {
    /// Creates an empty store in `Cart` view with the standard pricing policy.
    pub fn new() -> Self {
        CartStore::with_config(StoreConfig::default())
    }

    /// Creates an empty store using `policy` and default limits.
    pub fn with_policy(policy: PricingPolicy) -> Self {
        CartStore::with_config(StoreConfig {
            policy,
            ..StoreConfig::default()
        })
    }

    pub fn with_config(config: StoreConfig) -> Self {
        CartStore {
            items: Vec::new(),
            view_mode: ViewMode::Cart,
            draft: ItemDraft::default(),
            next_id: 1,
            config,
            observers: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Validates raw form values and appends a new line item.
    ///
    /// ## Behavior
    /// - `name`, `unit_price_raw`, `quantity_raw` must be non-blank
    ///   (checked in that order) → [`CartError::Validation`]
    /// - price must be a non-negative amount, quantity a positive integer
    ///   → [`CartError::Parse`]
    /// - the cart must have room → [`CartError::CartFull`]
    ///
    /// On success the pending draft is cleared and observers are notified.
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price_raw: &str,
        quantity_raw: &str,
        description: &str,
    ) -> CartResult<LineItemId> {
        let (name, unit_price, quantity) =
            match self.check_item(name, unit_price_raw, quantity_raw) {
                Ok(checked) => checked,
                Err(err) => {
                    warn!(error = %err, "add_item rejected");
                    return Err(err);
                }
            };

        let id = LineItemId::new(self.next_id);
        self.next_id += 1;

        debug!(
            id = %id,
            item = %name,
            unit_price = %unit_price,
            quantity = quantity,
            "item added"
        );

        self.items.push(LineItem::new(
            id,
            name,
            unit_price,
            quantity,
            normalize_description(description),
        ));
        self.draft.clear();
        self.notify(CartEvent::ItemAdded { id });

        Ok(id)
    }

    /// Submits the pending draft as a new line item.
    ///
    /// The draft is cleared only when the item is accepted.
    pub fn submit_draft(&mut self) -> CartResult<LineItemId> {
        let ItemDraft {
            name,
            price,
            quantity,
            description,
        } = self.draft.clone();
        self.add_item(&name, &price, &quantity, &description)
    }

    /// Removes the item with `id`, keeping the order of the rest.
    ///
    /// Removing an unknown id is a no-op and returns `None`.
    pub fn remove_item(&mut self, id: LineItemId) -> Option<LineItem> {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            debug!(id = %id, "remove_item: no such item");
            return None;
        };

        let removed = self.items.remove(index);
        debug!(id = %id, remaining = self.items.len(), "item removed");
        self.notify(CartEvent::ItemRemoved { id });

        Some(removed)
    }

    /// Switches to the checkout view.
    ///
    /// Fails with [`CartError::EmptyCart`] only when the store was configured
    /// with `require_items_for_checkout` and holds no items.
    pub fn enter_checkout(&mut self) -> CartResult<()> {
        if self.config.require_items_for_checkout && self.items.is_empty() {
            warn!("enter_checkout rejected: cart is empty");
            return Err(CartError::EmptyCart);
        }

        self.set_view(ViewMode::Checkout);
        Ok(())
    }

    /// Returns to the cart view. Always succeeds.
    pub fn exit_checkout(&mut self) {
        self.set_view(ViewMode::Cart);
    }

    /// Replaces one field of the pending draft.
    pub fn update_draft(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Discards the pending draft.
    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Registers an observer called after every successful mutation.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.config.policy
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Derives totals from the current items. Never cached.
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.items, &self.config.policy)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            view_mode: self.view_mode,
            totals: self.totals(),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn check_item(
        &self,
        name: &str,
        unit_price_raw: &str,
        quantity_raw: &str,
    ) -> CartResult<(String, Money, i64)> {
        require(FIELD_NAME, name)?;
        require(FIELD_PRICE, unit_price_raw)?;
        require(FIELD_QUANTITY, quantity_raw)?;

        let name = validate_item_name(name)?;
        let unit_price = parse_price(unit_price_raw)?;
        let quantity = parse_quantity(quantity_raw)?;

        validate_cart_size(self.items.len(), self.config.max_items).map_err(|_| {
            CartError::CartFull {
                max: self.config.max_items.min(MAX_CART_ITEMS),
            }
        })?;

        Ok((name, unit_price, quantity))
    }

    fn set_view(&mut self, mode: ViewMode) {
        if self.view_mode == mode {
            return;
        }
        debug!(from = ?self.view_mode, to = ?mode, "view changed");
        self.view_mode = mode;
        self.notify(CartEvent::ViewChanged { mode });
    }

    fn notify(&mut self, event: CartEvent) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_event(&event, &snapshot);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("view_mode", &self.view_mode)
            .field("draft", &self.draft)
            .field("next_id", &self.next_id)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::{ParseError, ValidationError};
    use crate::types::TaxRate;
    use crate::MAX_AMOUNT;

    fn widget_and_gadget(store: &mut CartStore) -> (LineItemId, LineItemId) {
        let widget = store.add_item("Widget", "10.00", "2", "").unwrap();
        let gadget = store.add_item("Gadget", "25.50", "1", "").unwrap();
        (widget, gadget)
    }

    fn names(store: &CartStore) -> Vec<&str> {
        store.items().iter().map(LineItem::name).collect()
    }

    #[test]
    fn test_new_store_is_empty_cart_view() {
        let store = CartStore::new();
        assert!(store.is_empty());
        assert_eq!(store.view_mode(), ViewMode::Cart);
        assert!(store.draft().is_empty());

        let totals = store.totals();
        assert!(totals.subtotal.is_zero());
        assert_eq!(totals.total_items, 0);
        assert_eq!(totals.total_products, 0);
    }

    #[test]
    fn test_add_items_preserves_call_order() {
        let mut store = CartStore::new();
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            store.add_item(name, "1.00", "1", "").unwrap();
            assert_eq!(store.len(), i + 1);
        }
        assert_eq!(names(&store), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_widget_gadget_scenario() {
        let mut store = CartStore::new();
        widget_and_gadget(&mut store);

        let totals = store.totals();
        assert_eq!(store.len(), 2);
        assert_eq!(totals.subtotal.cents(), 4550);
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_products, 2);
        assert_eq!(totals.tax.cents(), 364);
        assert_eq!(totals.shipping.cents(), 599);
        assert_eq!(totals.total.cents(), 5513);
    }

    #[test]
    fn test_flat_policy_store() {
        let mut store = CartStore::with_policy(PricingPolicy::Flat);
        widget_and_gadget(&mut store);
        assert_eq!(store.totals().total.cents(), 4550);
    }

    #[test]
    fn test_ids_are_unique_and_never_reused() {
        let mut store = CartStore::new();
        let (widget, gadget) = widget_and_gadget(&mut store);
        assert_ne!(widget, gadget);

        store.remove_item(gadget);
        let third = store.add_item("Gizmo", "1", "1", "").unwrap();
        assert!(third > gadget);
    }

    #[test]
    fn test_empty_name_is_validation_error() {
        let mut store = CartStore::new();
        widget_and_gadget(&mut store);
        let before = store.items().to_vec();

        let err = store.add_item("   ", "10.00", "1", "").unwrap_err();
        assert_eq!(
            err,
            CartError::Validation(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_required_fields_checked_in_order() {
        let mut store = CartStore::new();
        let field_of = |err: CartError| match err {
            CartError::Validation(v) => v.field().to_string(),
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(field_of(store.add_item("", "", "", "").unwrap_err()), "name");
        assert_eq!(field_of(store.add_item("x", "", "", "").unwrap_err()), "price");
        assert_eq!(field_of(store.add_item("x", "1", "", "").unwrap_err()), "quantity");
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let mut store = CartStore::new();

        let err = store.add_item("Widget", "10.00", "0", "").unwrap_err();
        assert!(matches!(err, CartError::Parse(ParseError::MustBePositive { .. })));

        let err = store.add_item("Widget", "-1.00", "1", "").unwrap_err();
        assert!(matches!(err, CartError::Parse(ParseError::Negative { .. })));

        let err = store.add_item("Widget", "NaN", "1", "").unwrap_err();
        assert!(matches!(err, CartError::Parse(ParseError::NotANumber { .. })));

        assert!(store.is_empty());
    }

    #[test]
    fn test_price_above_ceiling_is_rejected() {
        let mut store = CartStore::new();

        let err = store
            .add_item("Big", "92233720368547758", "2", "")
            .unwrap_err();
        assert!(matches!(
            err,
            CartError::Parse(ParseError::AmountTooLarge { .. })
        ));
        assert!(store.is_empty());
        assert!(store.totals().total.is_zero());
    }

    #[test]
    fn test_full_cart_at_ceiling_totals_stay_positive() {
        let mut store = CartStore::with_policy(PricingPolicy::Taxed {
            tax_rate: TaxRate::from_bps(10000),
            free_shipping_threshold: MAX_AMOUNT,
            flat_shipping_fee: MAX_AMOUNT,
        });
        for i in 0..MAX_CART_ITEMS {
            store
                .add_item(&format!("Item {i}"), "1000000000.00", "999", "")
                .unwrap();
        }

        let totals = store.totals();
        assert_eq!(totals.subtotal.cents(), 9_990_000_000_000_000);
        assert_eq!(totals.tax, totals.subtotal);
        assert!(totals.shipping.is_zero());
        assert_eq!(totals.total.cents(), 19_980_000_000_000_000);
    }

    #[test]
    fn test_free_item_is_allowed() {
        let mut store = CartStore::new();
        let id = store.add_item("Sample", "0", "1", "").unwrap();
        assert!(store.get(id).unwrap().unit_price().is_zero());
    }

    #[test]
    fn test_description_is_optional() {
        let mut store = CartStore::new();
        let plain = store.add_item("Widget", "1", "1", "  ").unwrap();
        let described = store.add_item("Gadget", "1", "1", " blue ").unwrap();

        assert_eq!(store.get(plain).unwrap().description(), None);
        assert_eq!(store.get(described).unwrap().description(), Some("blue"));
    }

    #[test]
    fn test_cart_full() {
        let mut store = CartStore::with_config(StoreConfig {
            max_items: 2,
            ..StoreConfig::default()
        });
        widget_and_gadget(&mut store);

        let err = store.add_item("Gizmo", "1", "1", "").unwrap_err();
        assert_eq!(err, CartError::CartFull { max: 2 });
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut store = CartStore::new();
        widget_and_gadget(&mut store);
        let before = store.items().to_vec();

        assert!(store.remove_item(LineItemId::new(999)).is_none());
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let mut store = CartStore::new();
        store.add_item("a", "1", "1", "").unwrap();
        let b = store.add_item("b", "1", "1", "").unwrap();
        store.add_item("c", "1", "1", "").unwrap();

        let removed = store.remove_item(b).unwrap();
        assert_eq!(removed.name(), "b");
        assert_eq!(names(&store), ["a", "c"]);

        // Second removal of the same id changes nothing
        assert!(store.remove_item(b).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_checkout_round_trip_keeps_items() {
        let mut store = CartStore::new();
        widget_and_gadget(&mut store);
        let before = store.items().to_vec();

        store.enter_checkout().unwrap();
        assert_eq!(store.view_mode(), ViewMode::Checkout);
        store.exit_checkout();

        assert_eq!(store.view_mode(), ViewMode::Cart);
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_empty_cart_checkout_policy() {
        // Default: ungated
        let mut store = CartStore::new();
        store.enter_checkout().unwrap();
        assert_eq!(store.view_mode(), ViewMode::Checkout);
        assert!(store.totals().shipping.is_zero());

        let mut store = CartStore::with_config(StoreConfig {
            require_items_for_checkout: true,
            ..StoreConfig::default()
        });
        assert_eq!(store.enter_checkout(), Err(CartError::EmptyCart));
        assert_eq!(store.view_mode(), ViewMode::Cart);

        store.add_item("Widget", "1", "1", "").unwrap();
        assert!(store.enter_checkout().is_ok());
    }

    #[test]
    fn test_submit_draft_clears_on_success_only() {
        let mut store = CartStore::new();
        store.update_draft(DraftField::Name, "Widget");
        store.update_draft(DraftField::Price, "10.00");

        // Quantity missing: draft survives for correction
        assert!(store.submit_draft().is_err());
        assert_eq!(store.draft().name, "Widget");
        assert!(store.is_empty());

        store.update_draft(DraftField::Quantity, "2");
        let id = store.submit_draft().unwrap();
        assert!(store.draft().is_empty());
        assert_eq!(store.get(id).unwrap().quantity(), 2);
    }

    #[test]
    fn test_add_item_clears_pending_draft() {
        let mut store = CartStore::new();
        store.update_draft(DraftField::Name, "half typed");
        store.add_item("Widget", "1", "1", "").unwrap();
        assert!(store.draft().is_empty());
    }

    #[test]
    fn test_observers_see_each_successful_mutation() {
        let seen: Rc<RefCell<Vec<(CartEvent, usize)>>> = Rc::default();
        let mut store = CartStore::new();

        let sink = Rc::clone(&seen);
        store.subscribe(move |event: &CartEvent, snapshot: &CartSnapshot| {
            sink.borrow_mut().push((*event, snapshot.items.len()));
        });

        let (widget, _) = widget_and_gadget(&mut store);
        let _ = store.add_item("", "1", "1", "");
        store.remove_item(widget);
        store.remove_item(widget);
        store.enter_checkout().unwrap();
        store.enter_checkout().unwrap();
        store.exit_checkout();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 5);
        assert!(matches!(seen[0], (CartEvent::ItemAdded { .. }, 1)));
        assert!(matches!(seen[1], (CartEvent::ItemAdded { .. }, 2)));
        assert_eq!(seen[2], (CartEvent::ItemRemoved { id: widget }, 1));
        assert_eq!(
            seen[3].0,
            CartEvent::ViewChanged {
                mode: ViewMode::Checkout
            }
        );
        assert_eq!(seen[4].0, CartEvent::ViewChanged { mode: ViewMode::Cart });
    }

    #[test]
    fn test_snapshot_serializes_for_renderers() {
        let mut store = CartStore::new();
        widget_and_gadget(&mut store);

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["viewMode"], "cart");
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert_eq!(json["totals"]["subtotal"], 4550);
        assert_eq!(json["totals"]["totalItems"], 3);
    }
}
