//! # Text Views
//!
//! Renders a [`CartResponse`] as the Cart view or the Checkout view,
//! depending on its view mode.
//!
//! ```text
//! Cart view                              Checkout view
//! ─────────                              ─────────────
//! Cart Items (2)                         Checkout Summary
//!   #1 Widget   $10.00 × 2   $20.00        Widget × 2          $20.00
//!   #2 Gadget   $25.50 × 1   $25.50        Gadget × 1          $25.50
//!      blue                                Subtotal (3 items)  $45.50
//! Subtotal (3 items)        $45.50         Tax (8%)             $3.64
//!                                          Shipping             $5.99
//!                                          Total               $55.13
//! ```

use std::fmt;

use tally_core::{ItemDraft, Money, Totals, ViewMode};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;

const LABEL_WIDTH: usize = 24;
const AMOUNT_WIDTH: usize = 12;

/// Renders whichever view the response is in.
pub fn view(response: &CartResponse) -> String {
    match response.cart.view_mode {
        ViewMode::Cart => cart_view(response),
        ViewMode::Checkout => checkout_view(response),
    }
}

/// Item list with per-line totals, the running subtotal and any pending draft.
pub fn cart_view(response: &CartResponse) -> String {
    CartView(response).to_string()
}

/// Read-only order summary with tax and shipping where the policy has them.
pub fn checkout_view(response: &CartResponse) -> String {
    CheckoutView(response).to_string()
}

/// One-line error message for the text view.
pub fn error(err: &ApiError) -> String {
    format!("Error: {}\n", err.message)
}

struct CartView<'a>(&'a CartResponse);

impl fmt::Display for CartView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = &self.0.cart.items;

        writeln!(f, "Cart Items ({})", items.len())?;
        if items.is_empty() {
            writeln!(f, "  Your cart is empty. Add products with 'add' or 'set'.")?;
        }
        for item in items {
            writeln!(
                f,
                "  #{:<4} {:<30} {:>10} × {:<4} Total: {}",
                item.id(),
                item.name(),
                item.unit_price().to_string(),
                item.quantity(),
                item.line_total()
            )?;
            if let Some(description) = item.description() {
                writeln!(f, "        {description}")?;
            }
        }

        let totals = &self.0.cart.totals;
        summary_line(f, &items_label("Subtotal", totals), totals.subtotal)?;

        if !self.0.draft.is_empty() {
            draft_line(f, &self.0.draft)?;
        }

        Ok(())
    }
}

struct CheckoutView<'a>(&'a CartResponse);

impl fmt::Display for CheckoutView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.0;
        let totals = &response.cart.totals;

        writeln!(f, "Checkout Summary")?;
        if response.cart.items.is_empty() {
            writeln!(f, "  (no items)")?;
        }
        for item in &response.cart.items {
            let label = format!("{} × {}", item.name(), item.quantity());
            summary_line(f, &label, item.line_total())?;
        }

        summary_line(f, &items_label("Subtotal", totals), totals.subtotal)?;

        if let Some(tax_rate) = response.pricing.tax_rate() {
            summary_line(f, &format!("Tax ({}%)", tax_rate.percentage()), totals.tax)?;
            if totals.has_free_shipping() {
                writeln!(f, "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}", "Shipping", "FREE")?;
            } else {
                summary_line(f, "Shipping", totals.shipping)?;
            }
        }

        summary_line(f, "Total", totals.total)?;
        writeln!(f, "Type 'back' to return to the cart.")
    }
}

fn items_label(label: &str, totals: &Totals) -> String {
    let noun = if totals.total_items == 1 { "item" } else { "items" };
    format!("{label} ({} {noun})", totals.total_items)
}

fn summary_line(f: &mut fmt::Formatter<'_>, label: &str, amount: Money) -> fmt::Result {
    writeln!(
        f,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        label,
        amount.to_string()
    )
}

fn draft_line(f: &mut fmt::Formatter<'_>, draft: &ItemDraft) -> fmt::Result {
    writeln!(
        f,
        "Pending item: name='{}' price='{}' quantity='{}' description='{}'",
        draft.name, draft.price, draft.quantity, draft.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CartSession, PricingMode, ShellConfig};
    use tally_core::DraftField;

    fn scenario(config: &ShellConfig) -> CartSession {
        let mut session = CartSession::new(config);
        let store = session.store_mut();
        store.add_item("Widget", "10.00", "2", "").unwrap();
        store.add_item("Gadget", "25.50", "1", "blue").unwrap();
        session
    }

    #[test]
    fn test_empty_cart_view() {
        let session = CartSession::new(&ShellConfig::default());
        let text = view(&CartResponse::from(session.store()));
        assert!(text.starts_with("Cart Items (0)"));
        assert!(text.contains("Your cart is empty"));
        assert!(text.contains("$0.00"));
    }

    #[test]
    fn test_cart_view_lists_items() {
        let session = scenario(&ShellConfig::default());
        let text = view(&CartResponse::from(session.store()));

        assert!(text.starts_with("Cart Items (2)"));
        assert!(text.contains("Widget"));
        assert!(text.contains("Total: $20.00"));
        assert!(text.contains("blue"));
        assert!(text.contains("Subtotal (3 items)"));
        assert!(text.contains("$45.50"));
        assert!(!text.contains("Pending item"));
    }

    #[test]
    fn test_cart_view_shows_pending_draft() {
        let mut session = CartSession::new(&ShellConfig::default());
        session.store_mut().update_draft(DraftField::Name, "Gizmo");
        let text = view(&CartResponse::from(session.store()));
        assert!(text.contains("Pending item: name='Gizmo'"));
    }

    #[test]
    fn test_checkout_view_standard_pricing() {
        let mut session = scenario(&ShellConfig::default());
        session.store_mut().enter_checkout().unwrap();
        let text = view(&CartResponse::from(session.store()));

        assert!(text.starts_with("Checkout Summary"));
        assert!(text.contains("Widget × 2"));
        assert!(text.contains("Tax (8%)"));
        assert!(text.contains("$3.64"));
        assert!(text.contains("$5.99"));
        assert!(text.contains("$55.13"));
    }

    #[test]
    fn test_checkout_view_free_shipping() {
        let mut session = CartSession::new(&ShellConfig::default());
        session
            .store_mut()
            .add_item("Bundle", "60.00", "1", "")
            .unwrap();
        session.store_mut().enter_checkout().unwrap();
        let text = view(&CartResponse::from(session.store()));

        assert!(text.contains("FREE"));
        assert!(text.contains("$64.80"));
    }

    #[test]
    fn test_checkout_view_flat_pricing_has_no_tax_lines() {
        let config = ShellConfig {
            pricing: PricingMode::Flat,
            ..ShellConfig::default()
        };
        let mut session = scenario(&config);
        session.store_mut().enter_checkout().unwrap();
        let text = view(&CartResponse::from(session.store()));

        assert!(!text.contains("Tax"));
        assert!(!text.contains("Shipping"));
        assert!(text.contains("$45.50"));
    }
}
