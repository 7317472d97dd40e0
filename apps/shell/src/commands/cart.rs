//! # Cart Commands
//!
//! Handlers for cart manipulation. Each returns the full cart so the caller
//! can redraw the current view.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                        │
//! │  │  Cart    │     │          │◄────│ Summary  │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │        back                                    │
//! │                   add_to_cart                                           │
//! │                   submit_draft                                          │
//! │                   remove_from_cart                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tally_core::{
    CartSnapshot, CartStore, DraftField, ItemDraft, LineItemId, PricingPolicy,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartSession;

/// Cart response: snapshot plus what the views need around it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    #[serde(flatten)]
    pub cart: CartSnapshot,
    /// Pending add-item form values.
    pub draft: ItemDraft,
    pub pricing: PricingPolicy,
}

impl From<&CartStore> for CartResponse {
    fn from(store: &CartStore) -> Self {
        CartResponse {
            cart: store.snapshot(),
            draft: store.draft().clone(),
            pricing: *store.policy(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &CartSession) -> CartResponse {
    debug!(session = %session.id(), "get_cart command");
    CartResponse::from(session.store())
}

/// Adds a line item from raw field values.
pub fn add_to_cart(
    session: &mut CartSession,
    name: &str,
    price: &str,
    quantity: &str,
    description: &str,
) -> Result<CartResponse, ApiError> {
    debug!(session = %session.id(), item = name, price, quantity, "add_to_cart command");
    session.ensure_cart_view("add")?;

    session
        .store_mut()
        .add_item(name, price, quantity, description)?;
    Ok(CartResponse::from(session.store()))
}

/// Edits one field of the pending item.
pub fn set_draft_field(
    session: &mut CartSession,
    field: DraftField,
    value: String,
) -> Result<CartResponse, ApiError> {
    debug!(session = %session.id(), field = field.as_str(), "set_draft_field command");
    session.ensure_cart_view("set")?;

    session.store_mut().update_draft(field, value);
    Ok(CartResponse::from(session.store()))
}

/// Adds the pending item. The draft is kept if it is rejected.
pub fn submit_draft(session: &mut CartSession) -> Result<CartResponse, ApiError> {
    debug!(session = %session.id(), "submit_draft command");
    session.ensure_cart_view("submit")?;

    session.store_mut().submit_draft()?;
    Ok(CartResponse::from(session.store()))
}

/// Discards the pending item.
pub fn clear_draft(session: &mut CartSession) -> Result<CartResponse, ApiError> {
    debug!(session = %session.id(), "clear_draft command");
    session.ensure_cart_view("clear")?;

    session.store_mut().clear_draft();
    Ok(CartResponse::from(session.store()))
}

/// Removes a line item. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(
    session: &mut CartSession,
    id: LineItemId,
) -> Result<CartResponse, ApiError> {
    debug!(session = %session.id(), id = %id, "remove_from_cart command");
    session.ensure_cart_view("remove")?;

    session.store_mut().remove_item(id);
    Ok(CartResponse::from(session.store()))
}

/// Switches to the checkout summary.
pub fn enter_checkout(session: &mut CartSession) -> Result<CartResponse, ApiError> {
    debug!(session = %session.id(), "enter_checkout command");

    session.store_mut().enter_checkout()?;
    Ok(CartResponse::from(session.store()))
}

/// Returns to the cart view.
pub fn exit_checkout(session: &mut CartSession) -> CartResponse {
    debug!(session = %session.id(), "exit_checkout command");

    session.store_mut().exit_checkout();
    CartResponse::from(session.store())
}
