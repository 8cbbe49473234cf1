//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                       │
//! │  ├── CheckoutError   - every way a checkout call can fail              │
//! │  └── ErrorKind       - fieldless discriminant for callers              │
//! │                                                                         │
//! │  checkout-cli errors (app)                                              │
//! │  └── ApiError        - what a caller sees (serialized code + message)  │
//! │                                                                         │
//! │  Flow: CheckoutError → ApiError → JSON on stdout, exit status          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field path, offending value)
//! 3. Every error is fatal to the current call: no partial results
//! 4. Field paths point into the request: `items[2].qty`

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors returned by the checkout pipeline.
///
/// The first violation found aborts the call. Validation runs request-level
/// checks first, then items in input order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required field is absent (or explicitly null) on the request or an item.
    #[error("{field} is required")]
    MissingField { field: String },

    /// A field is present but has the wrong JSON type.
    ///
    /// ## When This Occurs
    /// - `items` is not an array
    /// - an item is not an object
    /// - `price` or `qty` is not a number
    /// - `user_id` is an array or object
    #[error("{field} must be {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    /// A collection is present but has zero elements.
    #[error("{field} must not be empty")]
    EmptyCollection { field: String },

    /// A numeric value violates its constraint.
    ///
    /// ## When This Occurs
    /// - item `price` or `qty` is zero or negative
    /// - a number is too large to represent exactly
    #[error("{field} must be {constraint}, got {value}")]
    InvalidValue {
        field: String,
        constraint: &'static str,
        value: String,
    },

    /// Coupon code matches no known discount rule.
    #[error("unknown coupon: {code}")]
    UnknownCoupon { code: String },

    /// An intermediate amount cannot be held exactly: its integer part
    /// overflows, or it needs more fractional digits than a decimal carries.
    #[error("amount not exactly representable while computing {stage}")]
    AmountOverflow { stage: &'static str },

    /// Request text is not valid JSON.
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl CheckoutError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        CheckoutError::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid_type(field: impl Into<String>, expected: &'static str) -> Self {
        CheckoutError::InvalidType {
            field: field.into(),
            expected,
        }
    }

    /// Returns the fieldless kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckoutError::MissingField { .. } => ErrorKind::MissingField,
            CheckoutError::InvalidType { .. } => ErrorKind::InvalidType,
            CheckoutError::EmptyCollection { .. } => ErrorKind::EmptyCollection,
            CheckoutError::InvalidValue { .. } => ErrorKind::InvalidValue,
            CheckoutError::UnknownCoupon { .. } => ErrorKind::UnknownCoupon,
            CheckoutError::AmountOverflow { .. } => ErrorKind::AmountOverflow,
            CheckoutError::Malformed(_) => ErrorKind::Malformed,
        }
    }
}

// =============================================================================
// Error Kind
// =============================================================================

/// Discriminant of [`CheckoutError`], for callers that map errors to codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    MissingField,
    InvalidType,
    EmptyCollection,
    InvalidValue,
    UnknownCoupon,
    AmountOverflow,
    Malformed,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Builds the field path of a property of the item at `index`.
pub(crate) fn item_field(index: usize, name: &str) -> String {
    format!("items[{index}].{name}")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CheckoutError::missing("user_id").to_string(),
            "user_id is required"
        );
        assert_eq!(
            CheckoutError::invalid_type("items", "an array").to_string(),
            "items must be an array"
        );
        assert_eq!(
            CheckoutError::EmptyCollection {
                field: "items".to_string()
            }
            .to_string(),
            "items must not be empty"
        );
        assert_eq!(
            CheckoutError::InvalidValue {
                field: item_field(1, "price"),
                constraint: "positive",
                value: "0".to_string(),
            }
            .to_string(),
            "items[1].price must be positive, got 0"
        );
        assert_eq!(
            CheckoutError::UnknownCoupon {
                code: "FOO".to_string()
            }
            .to_string(),
            "unknown coupon: FOO"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(CheckoutError::missing("items").kind(), ErrorKind::MissingField);
        assert_eq!(
            CheckoutError::UnknownCoupon {
                code: "X".to_string()
            }
            .kind(),
            ErrorKind::UnknownCoupon
        );
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CheckoutError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_kind_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::EmptyCollection).unwrap(),
            "\"EMPTY_COLLECTION\""
        );
    }
}
