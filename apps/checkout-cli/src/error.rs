//! # API Error Type
//!
//! What a caller sees when a checkout fails.
//!
//! ## Serialization
//! ```json
//! {
//!   "code": "UNKNOWN_COUPON",
//!   "status": 422,
//!   "message": "unknown coupon: FOO"
//! }
//! ```
//!
//! `status` is the HTTP status an API handler would answer with.

use checkout_core::{CheckoutError, ErrorKind};
use serde::Serialize;

/// Failure response for one checkout request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorKind,

    /// HTTP-style status
    pub status: u16,

    /// Human-readable error message for display
    pub message: String,
}

/// HTTP-style status for each error kind.
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::MissingField
        | ErrorKind::InvalidType
        | ErrorKind::EmptyCollection
        | ErrorKind::InvalidValue
        | ErrorKind::Malformed => 400,
        ErrorKind::UnknownCoupon | ErrorKind::AmountOverflow => 422,
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        let code = err.kind();
        ApiError {
            code,
            status: status_for(code),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
