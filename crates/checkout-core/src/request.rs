//! # Request Parser
//!
//! Surfaces the raw fields of an untyped checkout request.
//!
//! ```text
//! { "user_id": "u1", "items": [...], "coupon": "VIP" }
//!          │
//!          ▼
//! parse_request() ← THIS MODULE (no validation)
//!          │
//!          ▼
//! RawCheckoutRequest { user_id, items, coupon, currency = "USD" }
//!          │
//!          ▼
//! validation::validate() → CheckoutRequest
//! ```
//!
//! Absent keys surface as `Value::Null`, except `currency`, which takes the
//! default. An explicit `"currency": null` is kept as `null`. Validation
//! decides what each value means. Unknown keys are ignored.

use serde_json::{Map, Value};

use crate::error::{CheckoutError, CheckoutResult};

/// Currency used when the request does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// The fields of a checkout request, unvalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCheckoutRequest {
    pub user_id: Value,
    pub items: Value,
    pub coupon: Value,
    /// Already defaulted when the request omitted the key.
    pub currency: Value,
}

impl RawCheckoutRequest {
    /// Parses JSON text that must contain an object.
    pub fn from_json_str(input: &str, default_currency: &str) -> CheckoutResult<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value, default_currency)
    }

    /// Parses an already-decoded JSON value that must be an object.
    pub fn from_value(value: &Value, default_currency: &str) -> CheckoutResult<Self> {
        match value {
            Value::Object(map) => Ok(parse_request(map, default_currency)),
            _ => Err(CheckoutError::invalid_type("request", "an object")),
        }
    }
}

/// Extracts the checkout fields from `request`.
///
/// `currency` falls back to `default_currency` only when the key is
/// absent. Nothing else is checked here.
pub fn parse_request(request: &Map<String, Value>, default_currency: &str) -> RawCheckoutRequest {
    let field = |name: &str| request.get(name).cloned().unwrap_or(Value::Null);

    RawCheckoutRequest {
        user_id: field("user_id"),
        items: field("items"),
        coupon: field("coupon"),
        currency: request
            .get("currency")
            .cloned()
            .unwrap_or_else(|| Value::String(default_currency.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_missing_fields_surface_as_null() {
        let raw = parse_request(&object(json!({})), DEFAULT_CURRENCY);
        assert_eq!(raw.user_id, Value::Null);
        assert_eq!(raw.items, Value::Null);
        assert_eq!(raw.coupon, Value::Null);
        assert_eq!(raw.currency, json!("USD"));
    }

    #[test]
    fn test_explicit_currency_is_kept() {
        let raw = parse_request(&object(json!({"currency": "EUR"})), DEFAULT_CURRENCY);
        assert_eq!(raw.currency, json!("EUR"));
    }

    #[test]
    fn test_null_currency_is_not_defaulted() {
        let raw = parse_request(&object(json!({"currency": null})), "GBP");
        assert_eq!(raw.currency, Value::Null);

        let raw = parse_request(&object(json!({})), "GBP");
        assert_eq!(raw.currency, json!("GBP"));
    }

    #[test]
    fn test_values_pass_through_unchecked() {
        let raw = parse_request(
            &object(json!({"user_id": 5, "items": "nope", "coupon": 3, "extra": true})),
            DEFAULT_CURRENCY,
        );
        assert_eq!(raw.user_id, json!(5));
        assert_eq!(raw.items, json!("nope"));
        assert_eq!(raw.coupon, json!(3));
    }

    #[test]
    fn test_from_json_str_rejects_non_objects() {
        let err = RawCheckoutRequest::from_json_str("[1, 2]", DEFAULT_CURRENCY).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidType { .. }));

        let err = RawCheckoutRequest::from_json_str("{", DEFAULT_CURRENCY).unwrap_err();
        assert!(matches!(err, CheckoutError::Malformed(_)));
    }
}
