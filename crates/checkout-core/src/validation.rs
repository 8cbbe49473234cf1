//! # Validation Module
//!
//! Turns a [`RawCheckoutRequest`] into a typed [`CheckoutRequest`].
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fail-Fast Checks                                   │
//! │                                                                         │
//! │  Step 1: Request-level (validate_request)                              │
//! │  ├── user_id null?        → MissingField                               │
//! │  ├── items null?          → MissingField                               │
//! │  ├── items not an array?  → InvalidType                                │
//! │  └── items empty?         → EmptyCollection                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Step 2: Item-level, in input order (validate_items)                   │
//! │  ├── price or qty key absent? → MissingField                           │
//! │  ├── price <= 0?              → InvalidValue                           │
//! │  └── qty <= 0?                → InvalidValue                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Step 3: coupon / currency shape                                       │
//! │                                                                         │
//! │  The first violation wins; nothing is accumulated.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::request::{RawCheckoutRequest, DEFAULT_CURRENCY};
//! use checkout_core::validation::validate;
//!
//! let raw = RawCheckoutRequest::from_json_str(
//!     r#"{"user_id": "u1", "items": [{"price": 10, "qty": 1}]}"#,
//!     DEFAULT_CURRENCY,
//! ).unwrap();
//! let request = validate(&raw).unwrap();
//! assert_eq!(request.items_count(), 1);
//! ```

use serde_json::{Number, Value};

use crate::error::{item_field, CheckoutError, CheckoutResult};
use crate::money::Amount;
use crate::request::RawCheckoutRequest;
use crate::types::{CheckoutRequest, Item, UserId};

/// Runs every check and builds the typed request.
pub fn validate(raw: &RawCheckoutRequest) -> CheckoutResult<CheckoutRequest> {
    let (user_id, items) = validate_request(&raw.user_id, &raw.items)?;
    let items = validate_items(items)?;
    let coupon = validate_coupon(&raw.coupon)?;
    let currency = validate_currency(&raw.currency)?;

    Ok(CheckoutRequest {
        user_id,
        items,
        coupon,
        currency,
    })
}

// =============================================================================
// Request-Level Validators
// =============================================================================

/// Checks the request shape: a user id and a non-empty item array.
///
/// Returns the typed user id and the raw item values for [`validate_items`].
pub fn validate_request<'a>(
    user_id: &Value,
    items: &'a Value,
) -> CheckoutResult<(UserId, &'a [Value])> {
    let user_id = validate_user_id(user_id)?;

    let items = match items {
        Value::Null => return Err(CheckoutError::missing("items")),
        Value::Array(items) => items,
        _ => return Err(CheckoutError::invalid_type("items", "an array")),
    };

    if items.is_empty() {
        return Err(CheckoutError::EmptyCollection {
            field: "items".to_string(),
        });
    }

    Ok((user_id, items.as_slice()))
}

fn validate_user_id(value: &Value) -> CheckoutResult<UserId> {
    match value {
        Value::Null => Err(CheckoutError::missing("user_id")),
        Value::String(s) => Ok(UserId::Text(s.clone())),
        Value::Number(n) => Ok(UserId::Number(n.clone())),
        Value::Bool(b) => Ok(UserId::Flag(*b)),
        Value::Array(_) | Value::Object(_) => {
            Err(CheckoutError::invalid_type("user_id", "a string, number or boolean"))
        }
    }
}

// =============================================================================
// Item-Level Validators
// =============================================================================

/// Validates items in input order, stopping at the first bad one.
pub fn validate_items(items: &[Value]) -> CheckoutResult<Vec<Item>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect()
}

/// Validates the item at `index`.
///
/// Both keys must be present before either value is looked at, so an item
/// with `price: 0` and no `qty` reports the missing `qty`.
pub fn validate_item(index: usize, item: &Value) -> CheckoutResult<Item> {
    let fields = item
        .as_object()
        .ok_or_else(|| CheckoutError::invalid_type(format!("items[{index}]"), "an object"))?;

    let (price, qty) = match (fields.get("price"), fields.get("qty")) {
        (Some(price), Some(qty)) => (price, qty),
        (None, _) => return Err(CheckoutError::missing(item_field(index, "price"))),
        (_, None) => return Err(CheckoutError::missing(item_field(index, "qty"))),
    };

    let price = positive_amount(&item_field(index, "price"), price)?;
    let qty = positive_amount(&item_field(index, "qty"), qty)?;

    Ok(Item { price, qty })
}

fn positive_amount(field: &str, value: &Value) -> CheckoutResult<Amount> {
    let Value::Number(number) = value else {
        return Err(CheckoutError::invalid_type(field, "a number"));
    };

    let amount =
        Amount::from_json_number(number).ok_or_else(|| unrepresentable(field, number))?;

    if !amount.is_positive() {
        return Err(CheckoutError::InvalidValue {
            field: field.to_string(),
            constraint: "positive",
            value: number.to_string(),
        });
    }

    Ok(amount)
}

/// Says which limit an unrepresentable number broke.
fn unrepresentable(field: &str, number: &Number) -> CheckoutError {
    let too_large = number.as_f64().map_or(true, |n| n.abs() >= 1.0);
    CheckoutError::InvalidValue {
        field: field.to_string(),
        constraint: if too_large {
            "at most 79228162514264337593543950335"
        } else {
            "given to at most 28 decimal places"
        },
        value: number.to_string(),
    }
}

// =============================================================================
// Optional Field Validators
// =============================================================================

/// Coupon must be a string when present. The code itself is checked by
/// pricing, since an unknown code is a pricing error, not a shape error.
pub fn validate_coupon(value: &Value) -> CheckoutResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(code) => Ok(Some(code.clone())),
        _ => Err(CheckoutError::invalid_type("coupon", "a string")),
    }
}

/// Currency is passed through untouched. It must be a string, or an
/// explicit `null`, which stays `None`.
pub fn validate_currency(value: &Value) -> CheckoutResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(currency) => Ok(Some(currency.clone())),
        _ => Err(CheckoutError::invalid_type("currency", "a string or null")),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::request::DEFAULT_CURRENCY;
    use serde_json::json;

    fn raw(value: Value) -> RawCheckoutRequest {
        RawCheckoutRequest::from_value(&value, DEFAULT_CURRENCY).unwrap()
    }

    fn kind_of(value: Value) -> ErrorKind {
        validate(&raw(value)).unwrap_err().kind()
    }

    #[test]
    fn test_valid_request() {
        let request = validate(&raw(json!({
            "user_id": "u1",
            "items": [{"price": 100, "qty": 2}, {"price": 0.5, "qty": 3}],
            "coupon": "SAVE10"
        })))
        .unwrap();

        assert_eq!(request.user_id, UserId::from("u1"));
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[1].price, "0.5".parse::<Amount>().unwrap());
        assert_eq!(request.coupon.as_deref(), Some("SAVE10"));
        assert_eq!(request.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_request_level_errors() {
        assert_eq!(kind_of(json!({"items": [{"price": 1, "qty": 1}]})), ErrorKind::MissingField);
        assert_eq!(kind_of(json!({"user_id": null, "items": []})), ErrorKind::MissingField);
        assert_eq!(kind_of(json!({"user_id": "u1"})), ErrorKind::MissingField);
        assert_eq!(kind_of(json!({"user_id": "u1", "items": {}})), ErrorKind::InvalidType);
        assert_eq!(kind_of(json!({"user_id": "u1", "items": "abc"})), ErrorKind::InvalidType);
        assert_eq!(kind_of(json!({"user_id": "u1", "items": []})), ErrorKind::EmptyCollection);
    }

    #[test]
    fn test_user_id_checked_before_items() {
        let err = validate(&raw(json!({"items": []}))).unwrap_err();
        assert_eq!(err.to_string(), "user_id is required");
    }

    #[test]
    fn test_user_id_scalars() {
        let request = validate(&raw(json!({"user_id": 17, "items": [{"price": 1, "qty": 1}]})))
            .unwrap();
        assert_eq!(request.user_id.to_string(), "17");

        assert_eq!(
            kind_of(json!({"user_id": ["a"], "items": [{"price": 1, "qty": 1}]})),
            ErrorKind::InvalidType
        );
    }

    #[test]
    fn test_item_missing_keys() {
        let err = validate(&raw(json!({"user_id": "u1", "items": [{"qty": 1}]}))).unwrap_err();
        assert_eq!(err.to_string(), "items[0].price is required");

        let err = validate(&raw(json!({"user_id": "u1", "items": [{"price": 0}]}))).unwrap_err();
        assert_eq!(err.to_string(), "items[0].qty is required");
    }

    #[test]
    fn test_item_non_positive_values() {
        let err = validate(&raw(json!({"user_id": "u1", "items": [{"price": 0, "qty": 1}]})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.to_string(), "items[0].price must be positive, got 0");

        let err = validate(&raw(json!({"user_id": "u1", "items": [{"price": 5, "qty": -1}]})))
            .unwrap_err();
        assert_eq!(err.to_string(), "items[0].qty must be positive, got -1");
    }

    #[test]
    fn test_price_checked_before_qty() {
        let err = validate(&raw(json!({"user_id": "u1", "items": [{"price": -1, "qty": 0}]})))
            .unwrap_err();
        assert_eq!(err.to_string(), "items[0].price must be positive, got -1");
    }

    #[test]
    fn test_first_offending_item_wins() {
        let err = validate(&raw(json!({
            "user_id": "u1",
            "items": [
                {"price": 1, "qty": 1},
                {"price": 1, "qty": 0},
                {"qty": 1}
            ]
        })))
        .unwrap_err();
        assert_eq!(err.to_string(), "items[1].qty must be positive, got 0");
    }

    #[test]
    fn test_item_wrong_types() {
        assert_eq!(
            kind_of(json!({"user_id": "u1", "items": [42]})),
            ErrorKind::InvalidType
        );
        assert_eq!(
            kind_of(json!({"user_id": "u1", "items": [{"price": "10", "qty": 1}]})),
            ErrorKind::InvalidType
        );
        assert_eq!(
            kind_of(json!({"user_id": "u1", "items": [{"price": null, "qty": 1}]})),
            ErrorKind::InvalidType
        );
    }

    #[test]
    fn test_unrepresentable_number() {
        let err = validate(&raw(json!({"user_id": "u1", "items": [{"price": 1e300, "qty": 1}]})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(
            err.to_string(),
            "items[0].price must be at most 79228162514264337593543950335, got 1e300"
        );

        let err = validate(&raw(json!({"user_id": "u1", "items": [{"price": 1, "qty": 1e-30}]})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(
            err.to_string(),
            "items[0].qty must be given to at most 28 decimal places, got 1e-30"
        );
    }

    #[test]
    fn test_coupon_and_currency_shapes() {
        let items = json!([{"price": 1, "qty": 1}]);
        assert_eq!(
            kind_of(json!({"user_id": "u1", "items": items, "coupon": 10})),
            ErrorKind::InvalidType
        );
        assert_eq!(
            kind_of(json!({"user_id": "u1", "items": items, "currency": 1})),
            ErrorKind::InvalidType
        );

        let request = validate(&raw(json!({"user_id": "u1", "items": items, "coupon": null})))
            .unwrap();
        assert_eq!(request.coupon, None);

        let request = validate(&raw(json!({"user_id": "u1", "items": items, "currency": null})))
            .unwrap();
        assert_eq!(request.currency, None);
    }

    #[test]
    fn test_unknown_coupon_is_not_a_validation_error() {
        let request = validate(&raw(json!({
            "user_id": "u1",
            "items": [{"price": 1, "qty": 1}],
            "coupon": "FOO"
        })))
        .unwrap();
        assert_eq!(request.coupon.as_deref(), Some("FOO"));
    }
}
