//! # Change Notifications
//!
//! Renderers can subscribe to the store instead of polling it. Observers
//! run synchronously, right after a successful mutation, and receive the
//! event plus a fresh snapshot of the cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::store::CartSnapshot;
use crate::types::{LineItemId, ViewMode};

/// What changed in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    ItemAdded { id: LineItemId },
    ItemRemoved { id: LineItemId },
    ViewChanged { mode: ViewMode },
}

/// Receives cart change notifications.
///
/// Implemented for any `FnMut(&CartEvent, &CartSnapshot)`, so a closure is
/// usually enough.
pub trait CartObserver {
    fn on_event(&mut self, event: &CartEvent, snapshot: &CartSnapshot);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent, &CartSnapshot),
{
    fn on_event(&mut self, event: &CartEvent, snapshot: &CartSnapshot) {
        self(event, snapshot)
    }
}
