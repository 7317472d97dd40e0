//! # Item Draft
//!
//! The pending input buffer of the add-item form: four raw strings that the
//! user edits field by field and then submits.
//!
//! ```text
//! set(Name, "Widget") ─┐
//! set(Price, "10.00") ─┼──► ItemDraft ──► CartStore::submit_draft()
//! set(Quantity, "2") ──┘                      │
//!                                             ├── Ok  → item added, draft cleared
//!                                             └── Err → draft kept for correction
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{FIELD_DESCRIPTION, FIELD_NAME, FIELD_PRICE, FIELD_QUANTITY};

/// One editable field of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Price,
    Quantity,
    Description,
}

impl DraftField {
    /// Looks a field up by its form name (`name`, `price`, ...), case-insensitive.
    pub fn from_name(name: &str) -> Option<DraftField> {
        [
            DraftField::Name,
            DraftField::Price,
            DraftField::Quantity,
            DraftField::Description,
        ]
        .into_iter()
        .find(|field| field.as_str().eq_ignore_ascii_case(name.trim()))
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => FIELD_NAME,
            DraftField::Price => FIELD_PRICE,
            DraftField::Quantity => FIELD_QUANTITY,
            DraftField::Description => FIELD_DESCRIPTION,
        }
    }
}

/// Raw, unvalidated form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDraft {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
}

impl ItemDraft {
    /// Replaces one field's value.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::Price => &mut self.price,
            DraftField::Quantity => &mut self.quantity,
            DraftField::Description => &mut self.description,
        };
        *slot = value.into();
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Price => &self.price,
            DraftField::Quantity => &self.quantity,
            DraftField::Description => &self.description,
        }
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        *self = ItemDraft::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &ItemDraft::default()
    }
}
