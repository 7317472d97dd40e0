//! # Shell State
//!
//! - [`ShellConfig`]: startup configuration (read-only once running)
//! - [`CartSession`]: the user's cart store

mod config;
mod session;

pub use config::{PricingMode, ShellConfig};
pub use session::CartSession;
