//! Basis-point representation for fees and slippage bounds.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::{AmmError, Result};
use crate::math::mul_div;

/// Basis-point denominator (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Any `u32` can be held, but only `0..=10_000` is a meaningful percentage.
/// Constructors that take user input go through [`percent`](Self::percent),
/// which rejects values above 100%.
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::BasisPoints;
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.get(), 30);
/// assert!(bp.is_valid_percent());
/// assert!(BasisPoints::percent(10_001).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates a `BasisPoints` that must lie within `0..=10_000`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] if `value > 10_000`.
    pub const fn percent(value: u32) -> Result<Self> {
        if value > BPS_DENOMINATOR {
            return Err(AmmError::InvalidAmount(
                "basis points must not exceed 10000",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// Returns the complement `10_000 - self`, saturating at zero.
    #[must_use]
    pub const fn complement(&self) -> Self {
        Self(BPS_DENOMINATOR.saturating_sub(self.0))
    }

    /// Computes `amount × self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only if the result exceeds `u128`,
    /// which requires `self > 10_000`.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        mul_div(
            amount.get(),
            u128::from(self.0),
            u128::from(BPS_DENOMINATOR),
            rounding,
        )
        .map(Amount::new)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
