//! Spot price as an 18-decimal fixed-point ratio.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::amount::ONE_TOKEN;
use super::{Amount, Rounding};
use crate::error::{AmmError, Result};
use crate::math::mul_div;

/// Exchange rate `amount_b / amount_a`, scaled by `10^18`.
///
/// `Price::ONE` (raw `10^18`) means one unit of token A buys one unit of
/// token B.  Integer fixed point keeps price queries deterministic, unlike
/// a float ratio.
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::{Amount, Price, Rounding};
///
/// let p = Price::from_ratio(Amount::new(2_000), Amount::new(1_000), Rounding::Down)
///     .expect("non-zero denominator");
/// assert_eq!(p, Price::from_raw(2_000_000_000_000_000_000));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u128);

impl Price {
    /// Price ratio of zero.
    pub const ZERO: Self = Self(0);

    /// Price ratio of 1:1.
    pub const ONE: Self = Self(ONE_TOKEN);

    /// Wraps a raw 18-decimal fixed-point value.
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw 18-decimal fixed-point value.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Computes `numerator / denominator` in 18-decimal fixed point.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroReserve`] if `denominator` is zero.
    /// - [`AmmError::Overflow`] if the scaled ratio exceeds `u128`.
    pub fn from_ratio(numerator: Amount, denominator: Amount, rounding: Rounding) -> Result<Self> {
        if denominator.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        mul_div(numerator.get(), ONE_TOKEN, denominator.get(), rounding).map(Self)
    }

    /// Approximate `f64` value, for reporting only.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / ONE_TOKEN as f64
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same layout as an 18-decimal token amount.
        write!(f, "{}", Amount::new(self.0))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn one_is_scaled() {
        assert_eq!(Price::ONE.raw(), ONE_TOKEN);
        assert!((Price::ONE.as_f64() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_ratio_equal_reserves() {
        let Some(r) = Amount::from_tokens(1_000) else {
            panic!("fits");
        };
        assert_eq!(Price::from_ratio(r, r, Rounding::Down), Ok(Price::ONE));
    }

    #[test]
    fn from_ratio_rounds_down() {
        let Ok(p) = Price::from_ratio(Amount::new(1), Amount::new(3), Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(p.raw(), 333_333_333_333_333_333);
    }

    #[test]
    fn from_ratio_zero_denominator() {
        assert_eq!(
            Price::from_ratio(Amount::new(1), Amount::ZERO, Rounding::Down),
            Err(AmmError::ZeroReserve)
        );
    }

    #[test]
    fn display() {
        let p = Price::from_raw(ONE_TOKEN / 2);
        assert_eq!(p.to_string(), "0.5");
    }
}
