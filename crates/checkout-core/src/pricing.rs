//! # Pricing Engine
//!
//! Subtotal, coupon discount, tax and total for a validated request.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing Pipeline                                 │
//! │                                                                         │
//! │  items ──► subtotal = Σ price × qty            (exact, no truncation)  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  coupon ──► discount                           (truncated on its own)  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  discounted = max(subtotal - discount, 0)      (never negative)        │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  tax = floor(discounted × tax rate)            (truncated on its own)  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  total = discounted + tax                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Coupons
//! | Code     | Rule                                                      |
//! |----------|-----------------------------------------------------------|
//! | `SAVE10` | floor(10% of subtotal)                                    |
//! | `SAVE20` | floor(20% of subtotal) if subtotal ≥ 200, else floor(5%)  |
//! | `VIP`    | flat 50 if subtotal ≥ 100, else flat 10                   |
//!
//! Codes match exactly and case-sensitively. An absent or empty code means
//! no discount; any other code is [`CheckoutError::UnknownCoupon`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::{Amount, Rate};
use crate::types::Item;

// =============================================================================
// Pricing Constants
// =============================================================================

/// Tax applied to the discounted amount unless configured otherwise (21%).
pub const DEFAULT_TAX_RATE: Rate = Rate::from_bps(2100);

pub const SAVE10_RATE: Rate = Rate::from_bps(1000);

pub const SAVE20_RATE_HIGH: Rate = Rate::from_bps(2000);
pub const SAVE20_RATE_LOW: Rate = Rate::from_bps(500);
/// Subtotal at or above which `SAVE20` gives the high rate.
pub const SAVE20_THRESHOLD: Amount = Amount::from_units(200);

pub const VIP_DISCOUNT_HIGH: Amount = Amount::from_units(50);
pub const VIP_DISCOUNT_LOW: Amount = Amount::from_units(10);
/// Subtotal at or above which `VIP` gives the high flat discount.
pub const VIP_THRESHOLD: Amount = Amount::from_units(100);

// =============================================================================
// Coupon
// =============================================================================

/// A recognised coupon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coupon {
    #[serde(rename = "SAVE10")]
    Save10,
    #[serde(rename = "SAVE20")]
    Save20,
    #[serde(rename = "VIP")]
    Vip,
}

impl Coupon {
    /// Every recognised coupon.
    pub const ALL: [Coupon; 3] = [Coupon::Save10, Coupon::Save20, Coupon::Vip];

    /// The code a customer types.
    pub const fn code(&self) -> &'static str {
        match self {
            Coupon::Save10 => "SAVE10",
            Coupon::Save20 => "SAVE20",
            Coupon::Vip => "VIP",
        }
    }

    /// Resolves an optional code. `None` and `""` mean no coupon.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::pricing::Coupon;
    ///
    /// assert_eq!(Coupon::resolve(None).unwrap(), None);
    /// assert_eq!(Coupon::resolve(Some("")).unwrap(), None);
    /// assert_eq!(Coupon::resolve(Some("VIP")).unwrap(), Some(Coupon::Vip));
    /// assert!(Coupon::resolve(Some("vip")).is_err());
    /// ```
    pub fn resolve(code: Option<&str>) -> CheckoutResult<Option<Coupon>> {
        match code {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }

    /// The discount this coupon grants on `subtotal`.
    ///
    /// Rate-based discounts are truncated to whole units here, independently
    /// of the later tax step. The result may exceed the subtotal; the
    /// caller clamps.
    pub fn discount(&self, subtotal: Amount) -> CheckoutResult<Amount> {
        let rate = match self {
            Coupon::Save10 => SAVE10_RATE,
            Coupon::Save20 => {
                if subtotal >= SAVE20_THRESHOLD {
                    SAVE20_RATE_HIGH
                } else {
                    SAVE20_RATE_LOW
                }
            }
            Coupon::Vip => {
                return Ok(if subtotal >= VIP_THRESHOLD {
                    VIP_DISCOUNT_HIGH
                } else {
                    VIP_DISCOUNT_LOW
                });
            }
        };
        subtotal
            .floor_percentage(rate)
            .ok_or(CheckoutError::AmountOverflow { stage: "discount" })
    }
}

impl FromStr for Coupon {
    type Err = CheckoutError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Coupon::ALL
            .into_iter()
            .find(|coupon| coupon.code() == code)
            .ok_or_else(|| CheckoutError::UnknownCoupon {
                code: code.to_string(),
            })
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Stage Functions
// =============================================================================

/// Σ price × qty, exact.
///
/// A line or running sum that would need rounding is an
/// [`CheckoutError::AmountOverflow`], never a silently rounded subtotal.
pub fn calculate_subtotal(items: &[Item]) -> CheckoutResult<Amount> {
    items.iter().try_fold(Amount::ZERO, |acc, item| {
        item.line_total()
            .and_then(|line| acc.checked_add(line))
            .ok_or(CheckoutError::AmountOverflow { stage: "subtotal" })
    })
}

/// Discount for an optional coupon code.
pub fn calculate_discount(subtotal: Amount, coupon: Option<&str>) -> CheckoutResult<Amount> {
    match Coupon::resolve(coupon)? {
        Some(coupon) => coupon.discount(subtotal),
        None => Ok(Amount::ZERO),
    }
}

/// Tax on `amount`, truncated to whole units.
///
/// Any `u32` rate is accepted; a product too large for an [`Amount`] is
/// [`CheckoutError::AmountOverflow`].
#[inline]
pub fn calculate_tax(amount: Amount, rate: Rate) -> CheckoutResult<Amount> {
    amount
        .floor_percentage(rate)
        .ok_or(CheckoutError::AmountOverflow { stage: "tax" })
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Every intermediate amount of one pricing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Amount,
    /// As granted by the coupon, before clamping.
    pub discount: Amount,
    /// `max(subtotal - discount, 0)`.
    pub discounted: Amount,
    pub tax: Amount,
    pub total: Amount,
}

/// Runs the full pricing pipeline.
///
/// ## Example
/// ```rust
/// use checkout_core::money::Amount;
/// use checkout_core::pricing::{price_items, DEFAULT_TAX_RATE};
/// use checkout_core::types::Item;
///
/// let items = [Item::new(100, 2)];
/// let breakdown = price_items(&items, Some("SAVE10"), DEFAULT_TAX_RATE).unwrap();
///
/// assert_eq!(breakdown.subtotal, Amount::from(200));
/// assert_eq!(breakdown.discount, Amount::from(20));
/// assert_eq!(breakdown.discounted, Amount::from(180));
/// assert_eq!(breakdown.tax, Amount::from(37));
/// assert_eq!(breakdown.total, Amount::from(217));
/// ```
pub fn price_items(
    items: &[Item],
    coupon: Option<&str>,
    tax_rate: Rate,
) -> CheckoutResult<PriceBreakdown> {
    let subtotal = calculate_subtotal(items)?;
    let discount = calculate_discount(subtotal, coupon)?;
    let discounted = (subtotal - discount).clamp_non_negative();
    let tax = calculate_tax(discounted, tax_rate)?;
    let total = discounted
        .checked_add(tax)
        .ok_or(CheckoutError::AmountOverflow { stage: "total" })?;

    debug!(
        %subtotal,
        %discount,
        %discounted,
        %tax,
        %total,
        coupon = coupon.unwrap_or(""),
        "Priced items"
    );

    Ok(PriceBreakdown {
        subtotal,
        discount,
        discounted,
        tax,
        total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn test_subtotal_is_exact() {
        let items = [
            Item::new(amount("19.99"), 3),
            Item::new(amount("0.01"), 1),
            Item::new(10, amount("1.5")),
        ];
        assert_eq!(calculate_subtotal(&items).unwrap(), amount("74.98"));
    }

    #[test]
    fn test_subtotal_overflow() {
        let huge = Amount::new(rust_decimal::Decimal::MAX);
        let err = calculate_subtotal(&[Item::new(huge, 2)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmountOverflow);
    }

    #[test]
    fn test_subtotal_never_rounds() {
        let tiny = amount("0.000000000000001");
        let err = calculate_subtotal(&[Item::new(tiny, tiny)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmountOverflow);

        let items = [Item::new(amount("123456789012.3456789"), amount("123456789.123456789"))];
        let err = calculate_subtotal(&items).unwrap_err();
        assert_eq!(
            err.to_string(),
            "amount not exactly representable while computing subtotal"
        );

        // each line is exact, the sum is not
        let items = [
            Item::new(amount("10000000000000000000000"), 1),
            Item::new(tiny, 1),
        ];
        assert!(calculate_subtotal(&items).is_err());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn test_no_coupon_no_discount(#[case] coupon: Option<&str>) {
        assert_eq!(calculate_discount(Amount::from(500), coupon).unwrap(), Amount::ZERO);
    }

    #[rstest]
    #[case::save10_whole("SAVE10", "200", "20")]
    #[case::save10_truncates("SAVE10", "205", "20")]
    #[case::save10_small("SAVE10", "9.99", "0")]
    #[case::save20_at_threshold("SAVE20", "200", "40")]
    #[case::save20_below_threshold("SAVE20", "199.99", "9")]
    #[case::save20_above_threshold("SAVE20", "250", "50")]
    #[case::vip_at_threshold("VIP", "100", "50")]
    #[case::vip_below_threshold("VIP", "99", "10")]
    #[case::vip_large_subtotal("VIP", "10000", "50")]
    #[case::vip_exceeds_subtotal("VIP", "5", "10")]
    fn test_coupon_discounts(#[case] code: &str, #[case] subtotal: &str, #[case] expected: &str) {
        assert_eq!(
            calculate_discount(amount(subtotal), Some(code)).unwrap(),
            amount(expected)
        );
    }

    #[rstest]
    #[case("FOO")]
    #[case("save10")]
    #[case(" VIP")]
    fn test_unknown_coupon(#[case] code: &str) {
        let err = calculate_discount(Amount::from(100), Some(code)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCoupon);
        assert_eq!(err.to_string(), format!("unknown coupon: {code}"));
    }

    #[test]
    fn test_coupon_code_round_trip() {
        for coupon in Coupon::ALL {
            assert_eq!(coupon.code().parse::<Coupon>().unwrap(), coupon);
            assert_eq!(coupon.to_string(), coupon.code());
        }
    }

    #[test]
    fn test_tax_truncates() {
        assert_eq!(calculate_tax(Amount::from(180), DEFAULT_TAX_RATE).unwrap(), Amount::from(37));
        assert_eq!(calculate_tax(Amount::from(4), DEFAULT_TAX_RATE).unwrap(), Amount::ZERO);
        assert_eq!(calculate_tax(Amount::ZERO, DEFAULT_TAX_RATE).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_tax_overflow_is_an_error() {
        let huge = Amount::new(rust_decimal::Decimal::MAX);
        let err = calculate_tax(huge, Rate::from_bps(u32::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmountOverflow);

        // rates above 100% still price
        let breakdown = price_items(&[Item::new(100, 1)], None, Rate::from_bps(20_000)).unwrap();
        assert_eq!(breakdown.tax, Amount::from(200));
        assert_eq!(breakdown.total, Amount::from(300));
    }

    #[test]
    fn test_discount_clamped_to_zero() {
        let breakdown = price_items(&[Item::new(5, 1)], Some("VIP"), DEFAULT_TAX_RATE).unwrap();
        assert_eq!(breakdown.subtotal, Amount::from(5));
        assert_eq!(breakdown.discount, Amount::from(10));
        assert_eq!(breakdown.discounted, Amount::ZERO);
        assert_eq!(breakdown.tax, Amount::ZERO);
        assert_eq!(breakdown.total, Amount::ZERO);
    }

    #[test]
    fn test_truncation_does_not_compound() {
        // subtotal 205: discount floor(20.5) = 20, discounted 185,
        // tax floor(38.85) = 38. The 0.5 lost at the discount step is not
        // carried into the tax step.
        let breakdown =
            price_items(&[Item::new(amount("20.5"), 10)], Some("SAVE10"), DEFAULT_TAX_RATE)
                .unwrap();
        assert_eq!(breakdown.discount, Amount::from(20));
        assert_eq!(breakdown.discounted, Amount::from(185));
        assert_eq!(breakdown.tax, Amount::from(38));
        assert_eq!(breakdown.total, Amount::from(223));
    }

    #[test]
    fn test_fractional_discounted_amount_keeps_fraction() {
        // 10.5 with no coupon: tax floor(2.205) = 2, total 12.5
        let breakdown =
            price_items(&[Item::new(amount("10.5"), 1)], None, DEFAULT_TAX_RATE).unwrap();
        assert_eq!(breakdown.tax, Amount::from(2));
        assert_eq!(breakdown.total, amount("12.5"));
    }

    #[test]
    fn test_custom_tax_rate() {
        let breakdown = price_items(&[Item::new(100, 1)], None, Rate::from_bps(825)).unwrap();
        assert_eq!(breakdown.tax, Amount::from(8));
        assert_eq!(breakdown.total, Amount::from(108));
    }

    #[test]
    fn test_unknown_coupon_aborts_pricing() {
        let err = price_items(&[Item::new(100, 1)], Some("FOO"), DEFAULT_TAX_RATE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCoupon);
    }
}
