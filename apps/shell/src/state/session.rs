//! # Cart Session
//!
//! One user's cart for the lifetime of the process.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input Line             Command Handler          Store Change          │
//! │  ──────────             ───────────────          ────────────          │
//! │  add a | 1 | 2 ───────► add_to_cart() ─────────► items.push(item)      │
//! │  set name a ──────────► set_draft_field() ─────► draft.name = a        │
//! │  submit ──────────────► submit_draft() ────────► items.push(draft)     │
//! │  remove 3 ────────────► remove_from_cart() ────► items.remove(#3)      │
//! │  checkout ────────────► enter_checkout() ──────► view = Checkout       │
//! │  back ────────────────► exit_checkout() ───────► view = Cart           │
//! │  show ────────────────► get_cart() ────────────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded: the session owns its store outright, no locking.

use tally_core::{CartEvent, CartSnapshot, CartStore, ViewMode};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::ShellConfig;

/// The cart store plus an id used to correlate log lines.
#[derive(Debug)]
pub struct CartSession {
    id: Uuid,
    store: CartStore,
}

impl CartSession {
    /// Creates an empty session from configuration.
    ///
    /// Cart changes are logged through a store observer.
    pub fn new(config: &ShellConfig) -> Self {
        let id = Uuid::new_v4();
        let mut store = CartStore::with_config(config.store_config());

        store.subscribe(move |event: &CartEvent, snapshot: &CartSnapshot| {
            info!(
                session = %id,
                event = ?event,
                items = snapshot.items.len(),
                total = %snapshot.totals.total,
                "cart changed"
            );
        });

        CartSession { id, store }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CartStore {
        &mut self.store
    }

    /// Item edits are only offered on the Cart view.
    pub fn ensure_cart_view(&self, command: &str) -> Result<(), ApiError> {
        match self.store.view_mode() {
            ViewMode::Cart => Ok(()),
            ViewMode::Checkout => Err(ApiError::view_locked(command)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_view_gate() {
        let mut session = CartSession::new(&ShellConfig::default());
        assert!(session.ensure_cart_view("add").is_ok());

        session.store_mut().enter_checkout().unwrap();
        let err = session.ensure_cart_view("add").unwrap_err();
        assert_eq!(err.code, ErrorCode::ViewLocked);

        session.store_mut().exit_checkout();
        assert!(session.ensure_cart_view("add").is_ok());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let config = ShellConfig::default();
        assert_ne!(CartSession::new(&config).id(), CartSession::new(&config).id());
    }
}
