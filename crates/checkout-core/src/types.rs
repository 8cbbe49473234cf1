//! # Domain Types
//!
//! Typed values that flow through the checkout pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CheckoutRequest │   │      Item       │   │   OrderResult   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user_id        │   │  price > 0      │   │  order_id       │       │
//! │  │  items ─────────┼──►│  qty   > 0      │   │  subtotal       │       │
//! │  │  coupon         │   └─────────────────┘   │  discount, tax  │       │
//! │  │  currency       │                         │  total          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `CheckoutRequest` can only be built by validation (or by hand in
//! tests), so pricing code never sees a non-positive price or quantity.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Amount;

// =============================================================================
// User Id
// =============================================================================

/// The identifier of the user placing the order.
///
/// Any non-null JSON scalar is accepted. The textual form used in the order
/// id is the string itself, the number's JSON text, or `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Text(s) => f.write_str(s),
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId::Text(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId::Text(s)
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        UserId::Number(n.into())
    }
}

// =============================================================================
// Item
// =============================================================================

/// A line in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unit price, strictly positive.
    pub price: Amount,
    /// Quantity, strictly positive. Fractional quantities are allowed.
    pub qty: Amount,
}

impl Item {
    pub fn new(price: impl Into<Amount>, qty: impl Into<Amount>) -> Self {
        Item {
            price: price.into(),
            qty: qty.into(),
        }
    }

    /// Exact line total (price × qty), or `None` if it cannot be held
    /// without rounding.
    #[inline]
    pub fn line_total(&self) -> Option<Amount> {
        self.price.checked_mul(self.qty)
    }
}

// =============================================================================
// Checkout Request
// =============================================================================

/// A validated checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: UserId,
    /// Never empty.
    pub items: Vec<Item>,
    /// Coupon code as given. `None` and `Some("")` both mean no coupon.
    pub coupon: Option<String>,
    /// Defaulted when the request omitted it; `None` for an explicit `null`.
    pub currency: Option<String>,
}

impl CheckoutRequest {
    /// Number of item lines (not the sum of quantities).
    #[inline]
    pub fn items_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Order Result
// =============================================================================

/// The priced order summary returned to the caller.
///
/// ## Invariants
/// - `total - tax == max(subtotal - discount, 0)`
/// - `tax >= 0`, `total >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderResult {
    pub order_id: String,
    #[ts(type = "string | number | boolean")]
    pub user_id: UserId,
    pub currency: Option<String>,
    #[ts(type = "number")]
    pub subtotal: Amount,
    #[ts(type = "number")]
    pub discount: Amount,
    #[ts(type = "number")]
    pub tax: Amount,
    #[ts(type = "number")]
    pub total: Amount,
    pub items_count: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================
