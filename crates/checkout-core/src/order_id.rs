//! Order identifier generation.

use crate::types::UserId;

/// Fixed trailing segment of every order id.
pub const ORDER_ID_SUFFIX: &str = "X";

/// Derives the order id `"{user_id}-{items_count}-X"`.
///
/// Deterministic: the same user and item count always give the same id.
/// Ids are not unique across orders.
///
/// ```rust
/// use checkout_core::order_id::generate_order_id;
/// use checkout_core::types::UserId;
///
/// assert_eq!(generate_order_id(&UserId::from("u1"), 1), "u1-1-X");
/// ```
pub fn generate_order_id(user_id: &UserId, items_count: usize) -> String {
    format!("{user_id}-{items_count}-{ORDER_ID_SUFFIX}")
}
