//! # Configuration State
//!
//! Settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags
//! 2. Environment variables (`TALLY_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only once the session starts.

use serde::{Deserialize, Serialize};
use tally_core::totals::{
    STANDARD_FREE_SHIPPING_THRESHOLD, STANDARD_SHIPPING_FEE, STANDARD_TAX_RATE,
};
use tally_core::validation::{validate_amount, validate_tax_rate_bps};
use tally_core::{Money, PricingPolicy, StoreConfig, TaxRate, MAX_CART_ITEMS};
use tracing::warn;

use crate::error::ApiError;

/// Which pricing rules the cart applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// Subtotal only
    Flat,
    /// Tax plus threshold-based shipping
    #[default]
    Standard,
}

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    pub pricing: PricingMode,

    /// Tax rate in basis points (800 = 8%). Ignored in flat mode.
    pub tax_rate_bps: u32,

    /// Shipping is free when the subtotal is above this.
    pub free_shipping_threshold: Money,

    /// Shipping fee charged at or below the threshold.
    pub shipping_fee: Money,

    /// Refuse checkout while the cart is empty.
    pub require_items_for_checkout: bool,

    /// Emit JSON responses instead of text views.
    pub json_output: bool,
}

impl Default for ShellConfig {
    /// Defaults: 8% tax, free shipping over $50.00, otherwise $5.99.
    fn default() -> Self {
        ShellConfig {
            pricing: PricingMode::Standard,
            tax_rate_bps: STANDARD_TAX_RATE.bps(),
            free_shipping_threshold: STANDARD_FREE_SHIPPING_THRESHOLD,
            shipping_fee: STANDARD_SHIPPING_FEE,
            require_items_for_checkout: false,
            json_output: false,
        }
    }
}

impl ShellConfig {
    /// Creates a ShellConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_PRICING`: `flat` or `standard`
    /// - `TALLY_TAX_RATE`: percentage, e.g. "8" or "8.25"
    /// - `TALLY_FREE_SHIPPING_OVER`: amount, e.g. "50.00"
    /// - `TALLY_SHIPPING_FEE`: amount, e.g. "5.99"
    /// - `TALLY_REQUIRE_ITEMS`: `true`/`1` to gate checkout on a non-empty cart
    pub fn from_env() -> Self {
        ShellConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ShellConfig::default();

        if let Some(pricing) = lookup("TALLY_PRICING") {
            match pricing.trim().to_ascii_lowercase().as_str() {
                "flat" => config.pricing = PricingMode::Flat,
                "standard" => config.pricing = PricingMode::Standard,
                other => warn!(value = other, "ignoring unknown TALLY_PRICING"),
            }
        }

        if let Some(rate) = lookup("TALLY_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    config.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(value = %rate, "ignoring invalid TALLY_TAX_RATE"),
            }
        }

        if let Some(raw) = lookup("TALLY_FREE_SHIPPING_OVER") {
            match Money::parse("TALLY_FREE_SHIPPING_OVER", &raw) {
                Ok(amount) => config.free_shipping_threshold = amount,
                Err(err) => warn!(error = %err, "ignoring invalid TALLY_FREE_SHIPPING_OVER"),
            }
        }

        if let Some(raw) = lookup("TALLY_SHIPPING_FEE") {
            match Money::parse("TALLY_SHIPPING_FEE", &raw) {
                Ok(amount) => config.shipping_fee = amount,
                Err(err) => warn!(error = %err, "ignoring invalid TALLY_SHIPPING_FEE"),
            }
        }

        if let Some(flag) = lookup("TALLY_REQUIRE_ITEMS") {
            config.require_items_for_checkout =
                matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Checks ranges that env parsing alone cannot guarantee.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_tax_rate_bps(self.tax_rate_bps).map_err(|e| ApiError::config(e.to_string()))?;
        validate_amount("free_shipping_threshold", self.free_shipping_threshold)
            .map_err(|e| ApiError::config(e.to_string()))?;
        validate_amount("shipping_fee", self.shipping_fee)
            .map_err(|e| ApiError::config(e.to_string()))?;
        Ok(())
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        match self.pricing {
            PricingMode::Flat => PricingPolicy::Flat,
            PricingMode::Standard => PricingPolicy::Taxed {
                tax_rate: TaxRate::from_bps(self.tax_rate_bps),
                free_shipping_threshold: self.free_shipping_threshold,
                flat_shipping_fee: self.shipping_fee,
            },
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            policy: self.pricing_policy(),
            require_items_for_checkout: self.require_items_for_checkout,
            max_items: MAX_CART_ITEMS,
        }
    }
}
