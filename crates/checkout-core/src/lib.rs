//! # checkout-core: Pure Checkout Pricing
//!
//! This crate prices a shopping-cart checkout request. Every function is
//! pure: no I/O, no clocks, no shared state between calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Pricing                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Caller (API handler, checkout-cli, ...)                │   │
//! │  │   transport input ──► JSON object        OrderResult ──► out   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ checkout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌────────────┐  ┌─────────┐  ┌──────────┐       │   │
//! │  │   │ request │─►│ validation │─►│ pricing │─►│ order_id │       │   │
//! │  │   │  parse  │  │ fail-fast  │  │ coupons │  │ "u-n-X"  │       │   │
//! │  │   └─────────┘  └────────────┘  └─────────┘  └──────────┘       │   │
//! │  │                        checkout (orchestrator)                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`request`] - Untyped request parsing, default currency
//! - [`validation`] - Fail-fast request and item checks
//! - [`pricing`] - Subtotal, coupons, tax, total
//! - [`order_id`] - Deterministic order identifiers
//! - [`checkout`] - The orchestrator
//! - [`money`] - Exact decimal `Amount` and basis-point `Rate`
//! - [`types`] - `CheckoutRequest`, `Item`, `OrderResult`
//! - [`error`] - `CheckoutError`
//! - [`config`] - `PricingConfig`
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{process_checkout, Amount};
//! use serde_json::json;
//!
//! let request = json!({
//!     "user_id": "u1",
//!     "items": [{"price": 100, "qty": 2}],
//!     "coupon": "SAVE10"
//! });
//!
//! let result = process_checkout(request.as_object().unwrap()).unwrap();
//! assert_eq!(result.subtotal, Amount::from(200));
//! assert_eq!(result.discount, Amount::from(20));
//! assert_eq!(result.tax, Amount::from(37));
//! assert_eq!(result.total, Amount::from(217));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod money;
pub mod order_id;
pub mod pricing;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{process_checkout, Checkout};
pub use config::PricingConfig;
pub use error::{CheckoutError, CheckoutResult, ErrorKind};
pub use money::{Amount, Rate};
pub use pricing::{Coupon, PriceBreakdown};
pub use request::RawCheckoutRequest;
pub use types::*;
