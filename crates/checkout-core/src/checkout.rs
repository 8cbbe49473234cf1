//! # Checkout Orchestrator
//!
//! Sequences parsing, validation, pricing and id generation into one call.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout::process(request)                                             │
//! │       │                                                                 │
//! │       ├── parse_request()      → RawCheckoutRequest                     │
//! │       ├── validate()           → CheckoutRequest     (or MissingField,  │
//! │       │                                               InvalidType, ...) │
//! │       ├── price_items()        → PriceBreakdown      (or UnknownCoupon) │
//! │       ├── generate_order_id()  → "u1-1-X"                               │
//! │       └── OrderResult                                                   │
//! │                                                                         │
//! │  Any error returns immediately. The caller gets a complete              │
//! │  OrderResult or an error, never anything in between.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::config::PricingConfig;
use crate::error::CheckoutResult;
use crate::order_id::generate_order_id;
use crate::pricing::price_items;
use crate::request::{parse_request, RawCheckoutRequest};
use crate::types::{CheckoutRequest, OrderResult};
use crate::validation::validate;

/// A configured checkout engine.
///
/// Holds only immutable configuration, so one instance can be shared
/// freely between callers.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    config: PricingConfig,
}

impl Checkout {
    pub fn new(config: PricingConfig) -> Self {
        Checkout { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Prices an untyped request mapping.
    #[instrument(level = "debug", skip_all)]
    pub fn process(&self, request: &Map<String, Value>) -> CheckoutResult<OrderResult> {
        let raw = parse_request(request, &self.config.default_currency);
        self.process_raw(&raw)
    }

    /// Prices a JSON value, which must be an object.
    pub fn process_value(&self, request: &Value) -> CheckoutResult<OrderResult> {
        let raw = RawCheckoutRequest::from_value(request, &self.config.default_currency)?;
        self.process_raw(&raw)
    }

    /// Prices JSON text, which must hold an object.
    pub fn process_json(&self, input: &str) -> CheckoutResult<OrderResult> {
        let raw = RawCheckoutRequest::from_json_str(input, &self.config.default_currency)?;
        self.process_raw(&raw)
    }

    /// Validates and prices already-parsed fields.
    pub fn process_raw(&self, raw: &RawCheckoutRequest) -> CheckoutResult<OrderResult> {
        let request = validate(raw)?;
        debug!(
            user_id = %request.user_id,
            items_count = request.items_count(),
            "Request validated"
        );
        self.price(&request)
    }

    /// Prices a typed request.
    pub fn price(&self, request: &CheckoutRequest) -> CheckoutResult<OrderResult> {
        let breakdown = price_items(
            &request.items,
            request.coupon.as_deref(),
            self.config.tax_rate,
        )?;

        let items_count = request.items_count();
        Ok(OrderResult {
            order_id: generate_order_id(&request.user_id, items_count),
            user_id: request.user_id.clone(),
            currency: request.currency.clone(),
            subtotal: breakdown.subtotal,
            discount: breakdown.discount,
            tax: breakdown.tax,
            total: breakdown.total,
            items_count,
        })
    }
}

/// Prices an untyped request mapping with the default configuration
/// (21% tax, `"USD"`).
///
/// ## Example
/// ```rust
/// use checkout_core::process_checkout;
/// use serde_json::json;
///
/// let request = json!({
///     "user_id": "u1",
///     "items": [{"price": 100, "qty": 2}],
///     "coupon": "SAVE10"
/// });
/// let result = process_checkout(request.as_object().unwrap()).unwrap();
///
/// assert_eq!(result.order_id, "u1-1-X");
/// assert_eq!(result.total.to_string(), "217");
/// ```
pub fn process_checkout(request: &Map<String, Value>) -> CheckoutResult<OrderResult> {
    Checkout::default().process(request)
}

// =============================================================================
// Unit Tests
// =============================================================================
