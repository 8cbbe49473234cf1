//! # Money Module
//!
//! Provides the `Amount` type for prices, quantities and totals, and the
//! `Rate` type for percentages.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Checkout truncates at the discount and tax steps. A product that      │
//! │  should be exactly 37.0 but lands on 36.99999999 floors to 36.         │
//! │                                                                         │
//! │  OUR SOLUTION: Exact decimals                                           │
//! │    199.99 × 1 = 199.99 exactly, floor(180 × 0.21) = 37 exactly         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::{Amount, Rate};
//!
//! let price = Amount::from(100);
//! let line = price.checked_mul(Amount::from(2)).unwrap();
//! assert_eq!(line, Amount::from(200));
//!
//! // 21% of 180 is 37.8, truncated to 37
//! let tax = Amount::from(180).floor_percentage(Rate::from_bps(2100));
//! assert_eq!(tax, Some(Amount::from(37)));
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Amount Type
// =============================================================================

/// An exact decimal quantity: a price, an item quantity, or a computed total.
///
/// ## Design Decisions
/// - **Decimal (not i64 cents)**: request prices arrive with arbitrary
///   fractional digits and the subtotal must be carried at full precision
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Serialized as a JSON number**: whole values as integers (`200`),
///   fractional values as floats (`199.99`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Most fractional digits an amount can carry.
    pub const MAX_DECIMAL_PLACES: u32 = 28;

    /// Creates an amount from a whole number of units.
    ///
    /// `const` so pricing thresholds can be declared as constants.
    #[inline]
    pub const fn from_units(units: u32) -> Self {
        Amount(Decimal::from_parts(units, 0, 0, false, 0))
    }

    /// Wraps a decimal value.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Discards the fractional part, rounding toward negative infinity.
    ///
    /// Every amount that reaches a truncation step is non-negative, so this
    /// is the same as truncating toward zero.
    #[inline]
    pub fn floor(&self) -> Self {
        Amount(self.0.floor())
    }

    /// Returns `self` or zero, whichever is larger.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Amount;
    ///
    /// let owed = Amount::from(5) - Amount::from(10);
    /// assert_eq!(owed.clamp_non_negative(), Amount::ZERO);
    /// ```
    #[inline]
    pub fn clamp_non_negative(&self) -> Self {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            Amount::ZERO
        } else {
            *self
        }
    }

    /// Multiplies two amounts exactly.
    ///
    /// Returns `None` when the product cannot be held without rounding:
    /// its integer part overflows, or it needs more than
    /// [`Amount::MAX_DECIMAL_PLACES`] fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Amount;
    ///
    /// let tiny: Amount = "0.000000000000001".parse().unwrap();
    /// // 1e-30 would round to zero
    /// assert_eq!(tiny.checked_mul(tiny), None);
    /// ```
    pub fn checked_mul(&self, other: Amount) -> Option<Self> {
        if self.is_zero() || other.is_zero() {
            return Some(Amount::ZERO);
        }
        let (a, b) = (self.0.normalize(), other.0.normalize());
        let product = a.checked_mul(b)?;
        // Decimal rounds by lowering the scale
        (product.scale() == a.scale() + b.scale()).then_some(Amount(product))
    }

    /// Adds two amounts exactly, returning `None` on overflow or rounding.
    pub fn checked_add(&self, other: Amount) -> Option<Self> {
        let (a, b) = (self.0.normalize(), other.0.normalize());
        let sum = a.checked_add(b)?;
        (sum.is_zero() || sum.scale() == a.scale().max(b.scale())).then_some(Amount(sum))
    }

    /// Applies a percentage and truncates the result to a whole unit.
    ///
    /// ## Implementation
    /// `floor(mantissa × bps / (10^scale × 10000))` in `u128` integer math,
    /// so the result is exact for every amount and rate. Each pricing stage
    /// calls this on its own input, so truncation loss never carries from
    /// one stage into the next. Returns `None` when the result is too large
    /// for an `Amount`.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Amount, Rate};
    ///
    /// let subtotal = Amount::from(205);
    /// // 10% of 205 = 20.5 → 20
    /// assert_eq!(subtotal.floor_percentage(Rate::from_bps(1000)), Some(Amount::from(20)));
    /// ```
    pub fn floor_percentage(&self, rate: Rate) -> Option<Amount> {
        let mantissa = self.0.mantissa();
        // |mantissa| < 2^96 and bps < 2^32, so the product fits in u128
        let scaled = mantissa.unsigned_abs().checked_mul(u128::from(rate.bps()))?;
        let divisor = 10u128
            .checked_pow(self.0.scale())?
            .checked_mul(u128::from(Rate::BPS_PER_WHOLE))?;

        let quotient = i128::try_from(scaled / divisor).ok()?;
        let floored = match (mantissa < 0, scaled % divisor) {
            (false, _) => quotient,
            (true, 0) => -quotient,
            (true, _) => -quotient - 1,
        };
        Decimal::from_i128(floored).map(Amount)
    }

    /// Converts a JSON number to an amount without going through `f64`.
    ///
    /// Integers are taken as-is; other numbers are parsed from their JSON
    /// text (`199.99` stays `199.99`). Returns `None` when the value cannot
    /// be represented exactly: too large (`1e40`) or with more than
    /// [`Amount::MAX_DECIMAL_PLACES`] fractional digits (`1e-30`).
    pub fn from_json_number(number: &serde_json::Number) -> Option<Self> {
        if let Some(i) = number.as_i64() {
            return Some(Amount(Decimal::from(i)));
        }
        if let Some(u) = number.as_u64() {
            return Some(Amount(Decimal::from(u)));
        }
        let text = number.to_string();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
            .map(Amount)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<i64> for Amount {
    fn from(units: i64) -> Self {
        Amount(Decimal::from(units))
    }
}

impl From<i32> for Amount {
    fn from(units: i32) -> Self {
        Amount(Decimal::from(units))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Amount)
    }
}

/// Addition of two amounts.
///
/// Panics on overflow like the underlying `Decimal`; pricing code uses
/// [`Amount::checked_add`] where inputs are unbounded.
impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Amount(self.0 - other.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, x| acc + x)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            if let Some(i) = normalized.to_i64() {
                return serializer.serialize_i64(i);
            }
        }
        match normalized.to_f64() {
            Some(f) => serializer.serialize_f64(f),
            None => serializer.serialize_str(&normalized.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Decimal::try_from(v)
            .map(Amount)
            .map_err(|_| E::custom(format!("{v} is not representable as a decimal")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Decimal::from_str(v).map(Amount).map_err(E::custom)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21% (the default tax rate), 500 bps = 5%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Basis points in 100%.
    pub const BPS_PER_WHOLE: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", Decimal::new(i64::from(self.0), 2).normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
